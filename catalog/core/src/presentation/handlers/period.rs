// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

use super::{envelope, json_body, list_envelope, path_id, ApiResponse, ListQuery};
use crate::domain::period::PeriodId;
use crate::presentation::api::AppState;
use crate::presentation::error::WithMessage;
use crate::presentation::schemas;

pub async fn list_periods(State(state): State<Arc<AppState>>, Query(query): Query<ListQuery>) -> ApiResponse {
    const ERR: &str = "Error al obtener los periodos académicos";
    let limit = query.limit(ERR)?;
    let periods = state.services.periods.list_periods(limit).await.with_message(ERR)?;
    list_envelope("Periodos académicos encontrados correctamente", "periodos", "periodosEncontrados", periods)
}

pub async fn get_period(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResponse {
    const ERR: &str = "Error al obtener el periodo académico";
    let id = PeriodId(path_id(&id, "idPeriodo", ERR)?);
    let period = state.services.periods.get_period(id).await.with_message(ERR)?;
    envelope(StatusCode::OK, "Periodo académico encontrado correctamente", "periodoEncontrado", period)
}

pub async fn create_period(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    const ERR: &str = "Error al crear el periodo académico";
    let draft = schemas::parse_period(&json_body(body, ERR)?).with_message(ERR)?;
    let period = state.services.periods.create_period(draft).await.with_message(ERR)?;
    envelope(StatusCode::CREATED, "El periodo académico se creó correctamente", "periodoCreado", period)
}

pub async fn update_period(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    const ERR: &str = "Error al actualizar el periodo académico";
    let id = PeriodId(path_id(&id, "idPeriodo", ERR)?);
    let draft = schemas::parse_period(&json_body(body, ERR)?).with_message(ERR)?;
    let period = state.services.periods.update_period(id, draft).await.with_message(ERR)?;
    envelope(StatusCode::OK, "Periodo académico actualizado correctamente", "periodoActualizado", period)
}

pub async fn delete_period(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResponse {
    const ERR: &str = "Error al eliminar el periodo académico";
    let id = PeriodId(path_id(&id, "idPeriodo", ERR)?);
    let period = state.services.periods.delete_period(id).await.with_message(ERR)?;
    envelope(StatusCode::OK, "Periodo académico eliminado correctamente", "idPeriodo", period.id)
}
