// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Postgres Subject
//!
//! `SubjectRepository` over the `asignatura` table.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::repository::{RepositoryError, SubjectRepository};
use crate::domain::subject::{Subject, SubjectDraft, SubjectId};

pub struct PostgresSubjectRepository {
    pool: PgPool,
}

impl PostgresSubjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubjectRepository for PostgresSubjectRepository {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<Subject>, RepositoryError> {
        // NULL limit means no cap in PostgreSQL
        let rows = sqlx::query(
            r#"
            SELECT idasignatura, nombreasignatura, cargahoraria, idformato, informacion
            FROM asignatura
            ORDER BY idasignatura
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(parse_subject_row).collect()
    }

    async fn find_by_id(&self, id: SubjectId) -> Result<Option<Subject>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT idasignatura, nombreasignatura, cargahoraria, idformato, informacion
            FROM asignatura
            WHERE idasignatura = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_subject_row).transpose()
    }

    async fn create(&self, draft: &SubjectDraft) -> Result<SubjectId, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO asignatura (nombreasignatura, cargahoraria, idformato, informacion)
            VALUES ($1, $2, $3, $4)
            RETURNING idasignatura
            "#,
        )
        .bind(&draft.name)
        .bind(draft.load_hours)
        .bind(draft.format_id)
        .bind(&draft.info)
        .fetch_one(&self.pool)
        .await?;

        Ok(SubjectId(row.try_get("idasignatura")?))
    }

    async fn update(&self, id: SubjectId, draft: &SubjectDraft) -> Result<Option<Subject>, RepositoryError> {
        let row = sqlx::query(
            r#"
            UPDATE asignatura
            SET nombreasignatura = $1, cargahoraria = $2, idformato = $3, informacion = $4
            WHERE idasignatura = $5
            RETURNING idasignatura, nombreasignatura, cargahoraria, idformato, informacion
            "#,
        )
        .bind(&draft.name)
        .bind(draft.load_hours)
        .bind(draft.format_id)
        .bind(&draft.info)
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_subject_row).transpose()
    }

    async fn delete(&self, id: SubjectId) -> Result<Option<Subject>, RepositoryError> {
        let row = sqlx::query(
            r#"
            DELETE FROM asignatura
            WHERE idasignatura = $1
            RETURNING idasignatura, nombreasignatura, cargahoraria, idformato, informacion
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_subject_row).transpose()
    }
}

fn parse_subject_row(row: &PgRow) -> Result<Subject, RepositoryError> {
    Ok(Subject {
        id: SubjectId(row.try_get("idasignatura")?),
        name: row.try_get("nombreasignatura")?,
        load_hours: row.try_get("cargahoraria")?,
        format_id: row.try_get("idformato")?,
        info: row.try_get("informacion")?,
    })
}
