// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! HTTP error envelope
//!
//! Maps [`CatalogError`] kinds onto status codes and the JSON bodies the
//! catalog API has always returned:
//!
//! | Kind | Status | Body |
//! |------|--------|------|
//! | `NotFound` | 404 | `{ mensaje, error }` |
//! | `BusinessRule` | 422 | `{ mensaje, error }` |
//! | `Validation` | 400 | `{ mensaje, errores: [{ campo, detalle }] }` |
//! | `Internal` | 500 | `{ mensaje, error }` with a generic `error` |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::domain::error::CatalogError;

const INTERNAL_ERROR_DETAIL: &str = "Error interno del servidor";

#[derive(Debug)]
pub struct ApiError {
    /// Action-level summary, e.g. "Error al crear una nueva oferta"
    pub message: String,
    pub source: CatalogError,
}

impl ApiError {
    pub fn new(message: impl Into<String>, source: CatalogError) -> Self {
        Self {
            message: message.into(),
            source,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.source {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::BusinessRule(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self.source {
            CatalogError::Validation(issues) => json!({
                "mensaje": self.message,
                "errores": issues,
            }),
            CatalogError::Internal(detail) => {
                error!(kind = self.source.kind(), detail = %detail, "{}", self.message);
                json!({
                    "mensaje": self.message,
                    "error": INTERNAL_ERROR_DETAIL,
                })
            }
            other => {
                warn!(kind = other.kind(), status = status.as_u16(), "{}: {}", self.message, other);
                json!({
                    "mensaje": self.message,
                    "error": other.to_string(),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Attaches the action summary to a use-case failure
pub trait WithMessage<T> {
    fn with_message(self, message: &str) -> Result<T, ApiError>;
}

impl<T> WithMessage<T> for Result<T, CatalogError> {
    fn with_message(self, message: &str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::new(message, e))
    }
}
