// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Per-resource HTTP handlers
//!
//! Each handler parses its input through [`crate::presentation::schemas`],
//! calls one use case and wraps the result in a `{ mensaje, <payload> }`
//! envelope. Failures carry an action-level `mensaje` via [`WithMessage`].

pub mod curriculum;
pub mod offering;
pub mod period;
pub mod program;
pub mod subject;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::domain::error::{CatalogError, FieldIssue};
use crate::presentation::error::{ApiError, WithMessage};
use crate::presentation::schemas;

pub type ApiResponse = Result<(StatusCode, Json<Value>), ApiError>;

/// `?limite=N` on list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limite: Option<String>,
}

impl ListQuery {
    pub fn limit(&self, message: &str) -> Result<Option<i64>, ApiError> {
        schemas::parse_limit(self.limite.as_deref()).with_message(message)
    }
}

/// Unwraps an extracted JSON body, turning a malformed payload into a
/// validation failure instead of axum's plain-text rejection
pub fn json_body(body: Result<Json<Value>, JsonRejection>, message: &str) -> Result<Value, ApiError> {
    body.map(|Json(value)| value).map_err(|rejection| {
        ApiError::new(
            message,
            CatalogError::Validation(vec![FieldIssue::new("body", rejection.body_text())]),
        )
    })
}

pub fn path_id(raw: &str, field: &str, message: &str) -> Result<i32, ApiError> {
    schemas::parse_id(raw, field).with_message(message)
}

/// `{ "mensaje": message, key: payload }`
pub fn envelope(status: StatusCode, message: &str, key: &str, payload: impl serde::Serialize) -> ApiResponse {
    let payload = serde_json::to_value(payload)
        .map_err(|e| ApiError::new(message, CatalogError::internal(e.to_string())))?;

    let mut body = Map::new();
    body.insert("mensaje".to_string(), Value::String(message.to_string()));
    body.insert(key.to_string(), payload);
    Ok((status, Json(Value::Object(body))))
}

/// List responses also carry the row count
pub fn list_envelope<T: serde::Serialize>(message: &str, key: &str, count_key: &str, rows: Vec<T>) -> ApiResponse {
    let count = rows.len();
    let (status, Json(mut body)) = envelope(StatusCode::OK, message, key, rows)?;
    if let Value::Object(map) = &mut body {
        map.insert(count_key.to_string(), Value::from(count));
    }
    Ok((status, Json(body)))
}
