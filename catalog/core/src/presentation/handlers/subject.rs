// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

use super::{envelope, json_body, list_envelope, path_id, ApiResponse, ListQuery};
use crate::domain::subject::SubjectId;
use crate::presentation::api::AppState;
use crate::presentation::error::WithMessage;
use crate::presentation::schemas;

pub async fn list_subjects(State(state): State<Arc<AppState>>, Query(query): Query<ListQuery>) -> ApiResponse {
    const ERR: &str = "Error al obtener las asignaturas";
    let limit = query.limit(ERR)?;
    let subjects = state.services.subjects.list_subjects(limit).await.with_message(ERR)?;
    list_envelope("Asignaturas encontradas correctamente", "asignaturas", "asignaturasEncontradas", subjects)
}

pub async fn get_subject(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResponse {
    const ERR: &str = "Error al obtener la asignatura";
    let id = SubjectId(path_id(&id, "idAsignatura", ERR)?);
    let subject = state.services.subjects.get_subject(id).await.with_message(ERR)?;
    envelope(StatusCode::OK, "Asignatura encontrada correctamente", "asignatura", subject)
}

pub async fn create_subject(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    const ERR: &str = "Error al crear la asignatura";
    let draft = schemas::parse_subject(&json_body(body, ERR)?).with_message(ERR)?;
    let name = draft.name.clone();
    let id = state.services.subjects.create_subject(draft).await.with_message(ERR)?;
    envelope(
        StatusCode::CREATED,
        &format!("La asignatura: {} se creó correctamente", name),
        "idNuevaAsignatura",
        id,
    )
}

pub async fn update_subject(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    const ERR: &str = "Error al actualizar la asignatura";
    let id = SubjectId(path_id(&id, "idAsignatura", ERR)?);
    let draft = schemas::parse_subject(&json_body(body, ERR)?).with_message(ERR)?;
    let subject = state.services.subjects.update_subject(id, draft).await.with_message(ERR)?;
    envelope(StatusCode::OK, "Asignatura actualizada correctamente", "asignaturaActualizada", subject)
}

pub async fn delete_subject(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResponse {
    const ERR: &str = "Error al eliminar la asignatura";
    let id = SubjectId(path_id(&id, "idAsignatura", ERR)?);
    let subject = state.services.subjects.delete_subject(id).await.with_message(ERR)?;
    envelope(StatusCode::OK, "Asignatura eliminada correctamente", "idAsignatura", subject.id)
}
