// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Postgres Offering
//!
//! `OfferingRepository` over the `oferta` table.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::offering::{Offering, OfferingDraft, OfferingId, OfferingKey, RelatedOffering};
use crate::domain::period::PeriodId;
use crate::domain::program::ProgramId;
use crate::domain::repository::{OfferingRepository, RepositoryError};
use crate::domain::subject::SubjectId;

pub struct PostgresOfferingRepository {
    pool: PgPool,
}

impl PostgresOfferingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfferingRepository for PostgresOfferingRepository {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<Offering>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT idoferta, idprograma, idperiodo, idasignatura, grupo, cupo
            FROM oferta
            ORDER BY idoferta
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(parse_offering_row).collect()
    }

    async fn find_by_id(&self, id: OfferingId) -> Result<Option<Offering>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT idoferta, idprograma, idperiodo, idasignatura, grupo, cupo
            FROM oferta
            WHERE idoferta = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_offering_row).transpose()
    }

    async fn create(&self, draft: &OfferingDraft) -> Result<OfferingId, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO oferta (idprograma, idperiodo, idasignatura, grupo, cupo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING idoferta
            "#,
        )
        .bind(draft.program_id.0)
        .bind(draft.period_id.0)
        .bind(draft.subject_id.0)
        .bind(draft.group)
        .bind(draft.capacity)
        .fetch_one(&self.pool)
        .await?;

        Ok(OfferingId(row.try_get("idoferta")?))
    }

    async fn update(&self, id: OfferingId, draft: &OfferingDraft) -> Result<Option<Offering>, RepositoryError> {
        let row = sqlx::query(
            r#"
            UPDATE oferta
            SET idprograma = $1, idperiodo = $2, idasignatura = $3, grupo = $4, cupo = $5
            WHERE idoferta = $6
            RETURNING idoferta, idprograma, idperiodo, idasignatura, grupo, cupo
            "#,
        )
        .bind(draft.program_id.0)
        .bind(draft.period_id.0)
        .bind(draft.subject_id.0)
        .bind(draft.group)
        .bind(draft.capacity)
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_offering_row).transpose()
    }

    async fn delete(&self, id: OfferingId) -> Result<Option<Offering>, RepositoryError> {
        let row = sqlx::query(
            r#"
            DELETE FROM oferta
            WHERE idoferta = $1
            RETURNING idoferta, idprograma, idperiodo, idasignatura, grupo, cupo
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_offering_row).transpose()
    }

    async fn exists_duplicate(&self, key: OfferingKey, exclude: Option<OfferingId>) -> Result<bool, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM oferta
                WHERE idprograma = $1
                  AND idperiodo = $2
                  AND idasignatura = $3
                  AND grupo = $4
                  AND ($5::INTEGER IS NULL OR idoferta <> $5)
            ) AS duplicado
            "#,
        )
        .bind(key.program_id.0)
        .bind(key.period_id.0)
        .bind(key.subject_id.0)
        .bind(key.group)
        .bind(exclude.map(|id| id.0))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.try_get("duplicado")?)
    }

    async fn find_related(&self, id: OfferingId) -> Result<Option<RelatedOffering>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT o.idoferta, p.nombreprograma, pa.semestre, a.nombreasignatura,
                   a.informacion, o.grupo, o.cupo
            FROM oferta o
            JOIN programaacademico p ON p.idprograma = o.idprograma
            JOIN periodoacademico pa ON pa.idperiodo = o.idperiodo
            JOIN asignatura a ON a.idasignatura = o.idasignatura
            WHERE o.idoferta = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(RelatedOffering {
            id: OfferingId(row.try_get("idoferta")?),
            program_name: row.try_get("nombreprograma")?,
            semester: row.try_get("semestre")?,
            subject_name: row.try_get("nombreasignatura")?,
            subject_info: row.try_get("informacion")?,
            group: row.try_get("grupo")?,
            capacity: row.try_get("cupo")?,
        }))
    }
}

fn parse_offering_row(row: &PgRow) -> Result<Offering, RepositoryError> {
    Ok(Offering {
        id: OfferingId(row.try_get("idoferta")?),
        program_id: ProgramId(row.try_get("idprograma")?),
        period_id: PeriodId(row.try_get("idperiodo")?),
        subject_id: SubjectId(row.try_get("idasignatura")?),
        group: row.try_get("grupo")?,
        capacity: row.try_get("cupo")?,
    })
}
