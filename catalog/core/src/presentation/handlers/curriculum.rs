// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

use super::{envelope, json_body, list_envelope, path_id, ApiResponse, ListQuery};
use crate::domain::curriculum::CurriculumEntryId;
use crate::presentation::api::AppState;
use crate::presentation::error::WithMessage;
use crate::presentation::schemas;

pub async fn list_entries(State(state): State<Arc<AppState>>, Query(query): Query<ListQuery>) -> ApiResponse {
    const ERR: &str = "Error al obtener los planes de estudio";
    let limit = query.limit(ERR)?;
    let entries = state.services.curriculum.list_entries(limit).await.with_message(ERR)?;
    list_envelope("Planes de estudio encontrados correctamente", "planesEstudio", "planesEstudioEncontrados", entries)
}

pub async fn get_entry(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResponse {
    const ERR: &str = "Error al obtener el plan de estudio";
    let id = CurriculumEntryId(path_id(&id, "idPlanEstudio", ERR)?);
    let entry = state.services.curriculum.get_entry(id).await.with_message(ERR)?;
    envelope(StatusCode::OK, "Plan de estudio encontrado correctamente", "planEstudio", entry)
}

pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    const ERR: &str = "Error al crear el plan de estudio";
    let draft = schemas::parse_curriculum(&json_body(body, ERR)?).with_message(ERR)?;
    let entry = state.services.curriculum.create_entry(draft).await.with_message(ERR)?;
    envelope(StatusCode::CREATED, "El plan de estudio se creó correctamente", "planEstudioCreado", entry)
}

pub async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    const ERR: &str = "Error al actualizar el plan de estudio";
    let id = CurriculumEntryId(path_id(&id, "idPlanEstudio", ERR)?);
    let draft = schemas::parse_curriculum(&json_body(body, ERR)?).with_message(ERR)?;
    let entry = state.services.curriculum.update_entry(id, draft).await.with_message(ERR)?;
    envelope(StatusCode::OK, "Plan de estudio actualizado correctamente", "planEstudioActualizado", entry)
}

pub async fn delete_entry(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResponse {
    const ERR: &str = "Error al eliminar el plan de estudio";
    let id = CurriculumEntryId(path_id(&id, "idPlanEstudio", ERR)?);
    let entry = state.services.curriculum.delete_entry(id).await.with_message(ERR)?;
    envelope(StatusCode::OK, "Plan de estudio eliminado correctamente", "idPlanEstudio", entry.id)
}
