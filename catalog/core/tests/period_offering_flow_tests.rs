// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{send, test_app};
use serde_json::{json, Value};

fn period_body(semester: &str, start: &str, end: &str, state: i32) -> Value {
    json!({"semestre": semester, "fechaInicio": start, "fechaFin": end, "idEstado": state})
}

async fn seed_subject_and_program(app: &Router) -> (Value, Value) {
    let (status, body) = send(
        app,
        "POST",
        "/asignaturas",
        Some(json!({"nombreAsignatura": "Cálculo I", "cargaHoraria": 64, "idFormato": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let subject = body["idNuevaAsignatura"].clone();

    let (status, body) = send(
        app,
        "POST",
        "/programas",
        Some(json!({"nombrePrograma": "Ingeniería de Sistemas", "idNivel": 1, "idModalidad": 1, "duracionMeses": 60})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    (subject, body["idNuevoPrograma"].clone())
}

#[tokio::test]
async fn test_offering_requires_an_active_period() {
    let app = test_app();
    let (subject, program) = seed_subject_and_program(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/periodoacademico",
        Some(period_body("2026-1", "2026-02-01", "2026-06-30", 1)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["periodoCreado"]["estadoPeriodo"], "Preparación");
    let period = body["periodoCreado"]["idPeriodo"].clone();

    let offering = json!({
        "idPrograma": program,
        "idPeriodo": period,
        "idAsignatura": subject,
        "grupo": 1,
        "cupo": 30
    });

    let (status, body) = send(&app, "POST", "/ofertas", Some(offering.clone())).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["mensaje"], "Error al crear una nueva oferta");
    assert!(body["error"].as_str().unwrap().contains("preparacion"));

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/periodoacademico/{}", period),
        Some(period_body("2026-1", "2026-02-01", "2026-06-30", 2)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["periodoActualizado"]["estadoPeriodo"], "Activo");

    let (status, body) = send(&app, "POST", "/ofertas", Some(offering.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ofertaCreada"]["semestre"], "2026-1");
    assert_eq!(body["ofertaCreada"]["nombreAsignatura"], "Cálculo I");

    let (status, body) = send(&app, "POST", "/ofertas", Some(offering)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_closed_period_rejects_offerings() {
    let app = test_app();
    let (subject, program) = seed_subject_and_program(&app).await;

    let (_, body) = send(
        &app,
        "POST",
        "/periodoacademico",
        Some(period_body("2025-2", "2025-08-01", "2025-12-15", 2)),
    )
    .await;
    let period = body["periodoCreado"]["idPeriodo"].clone();
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/periodoacademico/{}", period),
        Some(period_body("2025-2", "2025-08-01", "2025-12-15", 3)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        "/ofertas",
        Some(json!({"idPrograma": program, "idPeriodo": period, "idAsignatura": subject, "grupo": 1, "cupo": 30})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "El periodo está cerrado");
}

#[tokio::test]
async fn test_offering_with_unknown_references() {
    let app = test_app();
    let (subject, program) = seed_subject_and_program(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/ofertas",
        Some(json!({"idPrograma": program, "idPeriodo": 41, "idAsignatura": subject, "grupo": 1, "cupo": 30})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No se encontró el periodo buscado");
}

#[tokio::test]
async fn test_active_periods_cannot_overlap() {
    let app = test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/periodoacademico",
        Some(period_body("2026-1", "2026-02-01", "2026-06-30", 2)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/periodoacademico",
        Some(period_body("2026-V", "2026-06-30", "2026-07-31", 2)),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("traslapada"));

    let (status, _) = send(
        &app,
        "POST",
        "/periodoacademico",
        Some(period_body("2026-2", "2026-07-01", "2026-12-15", 2)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_period_lifecycle_is_forward_only() {
    let app = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/periodoacademico",
        Some(period_body("2024-1", "2024-02-01", "2024-06-30", 3)),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    let (_, body) = send(
        &app,
        "POST",
        "/periodoacademico",
        Some(period_body("2024-1", "2024-02-01", "2024-06-30", 2)),
    )
    .await;
    let period = body["periodoCreado"]["idPeriodo"].clone();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/periodoacademico/{}", period),
        Some(period_body("2024-1", "2024-02-01", "2024-06-30", 1)),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("Transición"));
}

#[tokio::test]
async fn test_period_dates_are_validated() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/periodoacademico",
        Some(period_body("2026-1", "2026-06-30", "2026-02-01", 1)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errores"][0]["campo"], "fechaFin");

    let (status, body) = send(
        &app,
        "POST",
        "/periodoacademico",
        Some(period_body("2026-1", "2026-02-30", "2026-06-30", 1)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errores"][0]["campo"], "fechaInicio");
}
