// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use std::sync::Arc;

use super::{envelope, json_body, list_envelope, path_id, ApiResponse, ListQuery};
use crate::domain::offering::OfferingId;
use crate::presentation::api::AppState;
use crate::presentation::error::WithMessage;
use crate::presentation::schemas;

pub async fn list_offerings(State(state): State<Arc<AppState>>, Query(query): Query<ListQuery>) -> ApiResponse {
    const ERR: &str = "Error al obtener las ofertas";
    let limit = query.limit(ERR)?;
    let offerings = state.services.offerings.list_offerings(limit).await.with_message(ERR)?;
    list_envelope("Ofertas encontradas correctamente", "ofertas", "ofertasEncontradas", offerings)
}

pub async fn get_offering(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResponse {
    const ERR: &str = "Error al obtener la oferta";
    let id = OfferingId(path_id(&id, "idOferta", ERR)?);
    let offering = state.services.offerings.get_offering(id).await.with_message(ERR)?;
    envelope(StatusCode::OK, "Oferta encontrada correctamente", "oferta", offering)
}

pub async fn create_offering(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    const ERR: &str = "Error al crear una nueva oferta";
    let draft = schemas::parse_offering(&json_body(body, ERR)?).with_message(ERR)?;
    let offering = state.services.offerings.create_offering(draft).await.with_message(ERR)?;
    envelope(StatusCode::CREATED, "La oferta se creó correctamente", "ofertaCreada", offering)
}

pub async fn update_offering(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    const ERR: &str = "Error al actualizar la oferta";
    let id = OfferingId(path_id(&id, "idOferta", ERR)?);
    let draft = schemas::parse_offering(&json_body(body, ERR)?).with_message(ERR)?;
    let offering = state.services.offerings.update_offering(id, draft).await.with_message(ERR)?;
    envelope(StatusCode::OK, "Oferta actualizada correctamente", "ofertaActualizada", offering)
}

pub async fn delete_offering(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResponse {
    const ERR: &str = "Error al eliminar la oferta";
    let id = OfferingId(path_id(&id, "idOferta", ERR)?);
    let offering = state.services.offerings.delete_offering(id).await.with_message(ERR)?;
    envelope(StatusCode::OK, "Oferta eliminada correctamente", "idOferta", offering.id)
}
