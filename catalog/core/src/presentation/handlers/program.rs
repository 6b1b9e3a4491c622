// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

use super::{envelope, json_body, list_envelope, path_id, ApiResponse, ListQuery};
use crate::domain::program::ProgramId;
use crate::presentation::api::AppState;
use crate::presentation::error::WithMessage;
use crate::presentation::schemas;

pub async fn list_programs(State(state): State<Arc<AppState>>, Query(query): Query<ListQuery>) -> ApiResponse {
    const ERR: &str = "Error al obtener los programas académicos";
    let limit = query.limit(ERR)?;
    let programs = state.services.programs.list_programs(limit).await.with_message(ERR)?;
    list_envelope("Programas académicos encontrados correctamente", "programas", "programasEncontrados", programs)
}

pub async fn get_program(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResponse {
    const ERR: &str = "Error al obtener el programa académico";
    let id = ProgramId(path_id(&id, "idPrograma", ERR)?);
    let program = state.services.programs.get_program(id).await.with_message(ERR)?;
    envelope(StatusCode::OK, "Programa académico encontrado correctamente", "programa", program)
}

pub async fn create_program(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    const ERR: &str = "Error al crear el programa académico";
    let draft = schemas::parse_program(&json_body(body, ERR)?).with_message(ERR)?;
    let name = draft.name.clone();
    let id = state.services.programs.create_program(draft).await.with_message(ERR)?;
    envelope(
        StatusCode::CREATED,
        &format!("El programa académico: {} se creó correctamente", name),
        "idNuevoPrograma",
        id,
    )
}

pub async fn update_program(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    const ERR: &str = "Error al actualizar el programa académico";
    let id = ProgramId(path_id(&id, "idPrograma", ERR)?);
    let draft = schemas::parse_program(&json_body(body, ERR)?).with_message(ERR)?;
    let program = state.services.programs.update_program(id, draft).await.with_message(ERR)?;
    envelope(StatusCode::OK, "Programa académico actualizado correctamente", "programaActualizado", program)
}

pub async fn delete_program(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResponse {
    const ERR: &str = "Error al eliminar el programa académico";
    let id = ProgramId(path_id(&id, "idPrograma", ERR)?);
    let program = state.services.programs.delete_program(id).await.with_message(ERR)?;
    envelope(StatusCode::OK, "Programa académico eliminado correctamente", "idPrograma", program.id)
}
