// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Catalog Domain Errors
//!
//! The three domain failure kinds surfaced by every use case, plus a catch-all
//! for failures that are not a domain decision (I/O, unexpected missing rows).
//!
//! | Variant | Meaning | Typical source |
//! |---------|---------|----------------|
//! | `NotFound` | requested or referenced entity does not exist | lookups, FK checks |
//! | `BusinessRule` | well-formed request conflicts with an invariant | duplicates, overlap, state machine |
//! | `Validation` | malformed or out-of-range input fields | request schemas |
//! | `Internal` | anything else | repository failures |
//!
//! The enum is transport-agnostic; status codes are assigned in
//! `crate::presentation::error`.

use serde::Serialize;
use thiserror::Error;

use crate::domain::repository::RepositoryError;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Dotted path of the offending field (e.g. `fechaFin`)
    #[serde(rename = "campo")]
    pub field: String,

    /// Human-readable reason
    #[serde(rename = "detalle")]
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BusinessRule(String),

    #[error("Error de validación: {}", summarize(.0))]
    Validation(Vec<FieldIssue>),

    #[error("Error interno: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRule(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Short machine-friendly tag, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::BusinessRule(_) => "business_rule",
            Self::Validation(_) => "validation",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<RepositoryError> for CatalogError {
    fn from(err: RepositoryError) -> Self {
        match err {
            // Store-level uniqueness backs the use-case duplicate checks.
            RepositoryError::Conflict(msg) => CatalogError::BusinessRule(msg),
            other => CatalogError::Internal(other.to_string()),
        }
    }
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.field, i.message))
        .collect::<Vec<_>>()
        .join("; ")
}
