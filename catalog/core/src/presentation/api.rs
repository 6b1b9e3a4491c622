// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! HTTP router
//!
//! All catalog routes live under [`API_PREFIX`]; `/health` sits at the root.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::application::CatalogServices;
use crate::infrastructure::Database;
use crate::presentation::handlers::{curriculum, offering, period, program, subject};

pub const API_PREFIX: &str = "/api/Academium";

pub struct AppState {
    pub services: CatalogServices,
    /// `None` when running on the in-memory backend
    pub database: Option<Database>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(services: CatalogServices, database: Option<Database>) -> Self {
        Self {
            services,
            database,
            start_time: Instant::now(),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let catalog = Router::new()
        .route("/asignaturas", get(subject::list_subjects).post(subject::create_subject))
        .route(
            "/asignaturas/{id}",
            get(subject::get_subject).put(subject::update_subject).delete(subject::delete_subject),
        )
        .route("/programas", get(program::list_programs).post(program::create_program))
        .route(
            "/programas/{id}",
            get(program::get_program).put(program::update_program).delete(program::delete_program),
        )
        .route("/periodoacademico", get(period::list_periods).post(period::create_period))
        .route(
            "/periodoacademico/{id}",
            get(period::get_period).put(period::update_period).delete(period::delete_period),
        )
        .route("/planestudio", get(curriculum::list_entries).post(curriculum::create_entry))
        .route(
            "/planestudio/{id}",
            get(curriculum::get_entry).put(curriculum::update_entry).delete(curriculum::delete_entry),
        )
        .route("/ofertas", get(offering::list_offerings).post(offering::create_offering))
        .route(
            "/ofertas/{id}",
            get(offering::get_offering).put(offering::update_offering).delete(offering::delete_offering),
        );

    Router::new()
        .nest(API_PREFIX, catalog)
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// 200 `healthy`, or 503 `degraded` when the database does not answer
async fn health_handler(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    let (storage, database_up) = match &state.database {
        Some(db) => ("postgres", Some(db.ping().await)),
        None => ("memory", None),
    };

    let (status, label) = match database_up {
        Some(false) => {
            warn!("Health check: database is not answering");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded")
        }
        _ => (StatusCode::OK, "healthy"),
    };

    let database = match database_up {
        Some(true) => "up",
        Some(false) => "down",
        None => "n/a",
    };

    (
        status,
        Json(json!({
            "status": label,
            "uptime_seconds": state.start_time.elapsed().as_secs(),
            "storage": storage,
            "database": database,
        })),
    )
}
