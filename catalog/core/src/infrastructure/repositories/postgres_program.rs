// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Postgres Program
//!
//! `ProgramRepository` over the `programaacademico` table.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::program::{Program, ProgramDraft, ProgramId};
use crate::domain::repository::{ProgramRepository, RepositoryError};

pub struct PostgresProgramRepository {
    pool: PgPool,
}

impl PostgresProgramRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProgramRepository for PostgresProgramRepository {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<Program>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT idprograma, nombreprograma, idnivel, idmodalidad, duracionmeses
            FROM programaacademico
            ORDER BY idprograma
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(parse_program_row).collect()
    }

    async fn find_by_id(&self, id: ProgramId) -> Result<Option<Program>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT idprograma, nombreprograma, idnivel, idmodalidad, duracionmeses
            FROM programaacademico
            WHERE idprograma = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_program_row).transpose()
    }

    async fn create(&self, draft: &ProgramDraft) -> Result<ProgramId, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO programaacademico (nombreprograma, idnivel, idmodalidad, duracionmeses)
            VALUES ($1, $2, $3, $4)
            RETURNING idprograma
            "#,
        )
        .bind(&draft.name)
        .bind(draft.level_id)
        .bind(draft.modality_id)
        .bind(draft.duration_months)
        .fetch_one(&self.pool)
        .await?;

        Ok(ProgramId(row.try_get("idprograma")?))
    }

    async fn update(&self, id: ProgramId, draft: &ProgramDraft) -> Result<Option<Program>, RepositoryError> {
        let row = sqlx::query(
            r#"
            UPDATE programaacademico
            SET nombreprograma = $1, idnivel = $2, idmodalidad = $3, duracionmeses = $4
            WHERE idprograma = $5
            RETURNING idprograma, nombreprograma, idnivel, idmodalidad, duracionmeses
            "#,
        )
        .bind(&draft.name)
        .bind(draft.level_id)
        .bind(draft.modality_id)
        .bind(draft.duration_months)
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_program_row).transpose()
    }

    async fn delete(&self, id: ProgramId) -> Result<Option<Program>, RepositoryError> {
        let row = sqlx::query(
            r#"
            DELETE FROM programaacademico
            WHERE idprograma = $1
            RETURNING idprograma, nombreprograma, idnivel, idmodalidad, duracionmeses
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_program_row).transpose()
    }
}

fn parse_program_row(row: &PgRow) -> Result<Program, RepositoryError> {
    Ok(Program {
        id: ProgramId(row.try_get("idprograma")?),
        name: row.try_get("nombreprograma")?,
        level_id: row.try_get("idnivel")?,
        modality_id: row.try_get("idmodalidad")?,
        duration_months: row.try_get("duracionmeses")?,
    })
}
