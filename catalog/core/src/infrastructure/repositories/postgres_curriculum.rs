// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Postgres Curriculum
//!
//! `CurriculumRepository` over the `planestudio` table.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use crate::domain::curriculum::{
    CurriculumDraft, CurriculumEntry, CurriculumEntryId, CurriculumKey, RelatedCurriculumEntry,
};
use crate::domain::program::ProgramId;
use crate::domain::repository::{CurriculumRepository, RepositoryError};
use crate::domain::subject::SubjectId;

pub struct PostgresCurriculumRepository {
    pool: PgPool,
}

impl PostgresCurriculumRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CurriculumRepository for PostgresCurriculumRepository {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<CurriculumEntry>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT idplanestudio, idprograma, idasignatura, semestre, creditos
            FROM planestudio
            ORDER BY idplanestudio
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(parse_entry_row).collect()
    }

    async fn find_by_id(&self, id: CurriculumEntryId) -> Result<Option<CurriculumEntry>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT idplanestudio, idprograma, idasignatura, semestre, creditos
            FROM planestudio
            WHERE idplanestudio = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_entry_row).transpose()
    }

    async fn create(&self, draft: &CurriculumDraft) -> Result<CurriculumEntryId, RepositoryError> {
        let row = sqlx::query(
            r#"
            INSERT INTO planestudio (idprograma, idasignatura, semestre, creditos)
            VALUES ($1, $2, $3, $4)
            RETURNING idplanestudio
            "#,
        )
        .bind(draft.program_id.0)
        .bind(draft.subject_id.0)
        .bind(draft.semester)
        .bind(draft.credits)
        .fetch_one(&self.pool)
        .await?;

        Ok(CurriculumEntryId(row.try_get("idplanestudio")?))
    }

    async fn update(
        &self,
        id: CurriculumEntryId,
        draft: &CurriculumDraft,
    ) -> Result<Option<CurriculumEntry>, RepositoryError> {
        let row = sqlx::query(
            r#"
            UPDATE planestudio
            SET idprograma = $1, idasignatura = $2, semestre = $3, creditos = $4
            WHERE idplanestudio = $5
            RETURNING idplanestudio, idprograma, idasignatura, semestre, creditos
            "#,
        )
        .bind(draft.program_id.0)
        .bind(draft.subject_id.0)
        .bind(draft.semester)
        .bind(draft.credits)
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_entry_row).transpose()
    }

    async fn delete(&self, id: CurriculumEntryId) -> Result<Option<CurriculumEntry>, RepositoryError> {
        let row = sqlx::query(
            r#"
            DELETE FROM planestudio
            WHERE idplanestudio = $1
            RETURNING idplanestudio, idprograma, idasignatura, semestre, creditos
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(parse_entry_row).transpose()
    }

    async fn exists_duplicate(
        &self,
        key: CurriculumKey,
        exclude: Option<CurriculumEntryId>,
    ) -> Result<bool, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM planestudio
                WHERE idprograma = $1
                  AND idasignatura = $2
                  AND semestre = $3
                  AND ($4::INTEGER IS NULL OR idplanestudio <> $4)
            ) AS duplicado
            "#,
        )
        .bind(key.program_id.0)
        .bind(key.subject_id.0)
        .bind(key.semester)
        .bind(exclude.map(|id| id.0))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.try_get("duplicado")?)
    }

    async fn find_related(&self, id: CurriculumEntryId) -> Result<Option<RelatedCurriculumEntry>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT pe.idplanestudio, p.nombreprograma, a.nombreasignatura, pe.semestre, pe.creditos
            FROM planestudio pe
            JOIN programaacademico p ON p.idprograma = pe.idprograma
            JOIN asignatura a ON a.idasignatura = pe.idasignatura
            WHERE pe.idplanestudio = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(RelatedCurriculumEntry {
            id: CurriculumEntryId(row.try_get("idplanestudio")?),
            program_name: row.try_get("nombreprograma")?,
            subject_name: row.try_get("nombreasignatura")?,
            semester: row.try_get("semestre")?,
            credits: row.try_get("creditos")?,
        }))
    }
}

fn parse_entry_row(row: &PgRow) -> Result<CurriculumEntry, RepositoryError> {
    Ok(CurriculumEntry {
        id: CurriculumEntryId(row.try_get("idplanestudio")?),
        program_id: ProgramId(row.try_get("idprograma")?),
        subject_id: SubjectId(row.try_get("idasignatura")?),
        semester: row.try_get("semestre")?,
        credits: row.try_get("creditos")?,
    })
}
