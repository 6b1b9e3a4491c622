// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Postgres Period
//!
//! `PeriodRepository` over `periodoacademico`, joined with
//! `estadoperiodoacademico` for the related view.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::period::{AcademicPeriod, PeriodDraft, PeriodId, PeriodState, RelatedPeriod};
use crate::domain::repository::{PeriodRepository, RepositoryError};

pub struct PostgresPeriodRepository {
    pool: PgPool,
}

impl PostgresPeriodRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PeriodRepository for PostgresPeriodRepository {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<AcademicPeriod>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT idperiodo, semestre, fechainicio, fechafin, idestado
            FROM periodoacademico
            ORDER BY idperiodo
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(parse_period_row).collect()
    }

    async fn find_by_id(&self, id: PeriodId) -> Result<Option<AcademicPeriod>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT idperiodo, semestre, fechainicio, fechafin, idestado
            FROM periodoacademico
            WHERE idperiodo = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_period_row).transpose()
    }

    async fn create(&self, draft: &PeriodDraft) -> Result<PeriodId, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO periodoacademico (semestre, fechainicio, fechafin, idestado)
            VALUES ($1, $2, $3, $4)
            RETURNING idperiodo
            "#,
        )
        .bind(&draft.semester)
        .bind(draft.start_date)
        .bind(draft.end_date)
        .bind(draft.state.id())
        .fetch_one(&self.pool)
        .await?;

        Ok(PeriodId(row.try_get("idperiodo")?))
    }

    async fn update(&self, id: PeriodId, draft: &PeriodDraft) -> Result<Option<AcademicPeriod>, RepositoryError> {
        let row = sqlx::query(
            r#"
            UPDATE periodoacademico
            SET semestre = $1, fechainicio = $2, fechafin = $3, idestado = $4
            WHERE idperiodo = $5
            RETURNING idperiodo, semestre, fechainicio, fechafin, idestado
            "#,
        )
        .bind(&draft.semester)
        .bind(draft.start_date)
        .bind(draft.end_date)
        .bind(draft.state.id())
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_period_row).transpose()
    }

    async fn delete(&self, id: PeriodId) -> Result<Option<AcademicPeriod>, RepositoryError> {
        let row = sqlx::query(
            r#"
            DELETE FROM periodoacademico
            WHERE idperiodo = $1
            RETURNING idperiodo, semestre, fechainicio, fechafin, idestado
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_period_row).transpose()
    }

    async fn find_overlapping(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<PeriodId>,
    ) -> Result<Option<AcademicPeriod>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT idperiodo, semestre, fechainicio, fechafin, idestado
            FROM periodoacademico
            WHERE idestado = $1
              AND fechainicio <= $3
              AND fechafin >= $2
              AND ($4::INTEGER IS NULL OR idperiodo <> $4)
            ORDER BY idperiodo
            LIMIT 1
            "#,
        )
        .bind(PeriodState::Active.id())
        .bind(start)
        .bind(end)
        .bind(exclude.map(|id| id.0))
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_period_row).transpose()
    }

    async fn find_related(&self, id: PeriodId) -> Result<Option<RelatedPeriod>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT p.idperiodo, p.semestre, p.fechainicio, p.fechafin, e.nombreestado
            FROM periodoacademico p
            JOIN estadoperiodoacademico e ON e.idestado = p.idestado
            WHERE p.idperiodo = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(RelatedPeriod {
            id: PeriodId(row.try_get("idperiodo")?),
            semester: row.try_get("semestre")?,
            start_date: row.try_get("fechainicio")?,
            end_date: row.try_get("fechafin")?,
            state_name: row.try_get("nombreestado")?,
        }))
    }
}

fn parse_period_row(row: &PgRow) -> Result<AcademicPeriod, RepositoryError> {
    let state_id: i32 = row.try_get("idestado")?;
    let state = PeriodState::try_from(state_id).map_err(RepositoryError::Serialization)?;

    Ok(AcademicPeriod {
        id: PeriodId(row.try_get("idperiodo")?),
        semester: row.try_get("semestre")?,
        start_date: row.try_get("fechainicio")?,
        end_date: row.try_get("fechafin")?,
        state,
    })
}
