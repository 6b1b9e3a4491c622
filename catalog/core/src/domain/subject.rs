// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Subject ("asignatura")
//!
//! A course unit in the catalog. Stateless: no lifecycle beyond CRUD.

use serde::{Deserialize, Serialize};

/// Database-generated subject identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub i32);

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted subject row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "idAsignatura")]
    pub id: SubjectId,

    #[serde(rename = "nombreAsignatura")]
    pub name: String,

    /// Teaching load in hours
    #[serde(rename = "cargaHoraria")]
    pub load_hours: i32,

    #[serde(rename = "idFormato")]
    pub format_id: i32,

    /// Optional free-text description
    #[serde(rename = "informacion")]
    pub info: Option<String>,
}

/// Validated write payload for create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectDraft {
    pub name: String,
    pub load_hours: i32,
    pub format_id: i32,
    pub info: Option<String>,
}

impl SubjectDraft {
    pub fn into_subject(self, id: SubjectId) -> Subject {
        Subject {
            id,
            name: self.name,
            load_hours: self.load_hours,
            format_id: self.format_id,
            info: self.info,
        }
    }
}
