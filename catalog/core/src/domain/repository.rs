// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Persistence contracts for each catalog entity, following the DDD Repository
//! pattern: one repository per aggregate, interface defined in the domain layer,
//! implemented in `crate::infrastructure::repositories`.
//!
//! | Trait | Entity | Implementations |
//! |-------|--------|----------------|
//! | `SubjectRepository` | `Subject` | `InMemorySubjectRepository`, `PostgresSubjectRepository` |
//! | `ProgramRepository` | `Program` | `InMemoryProgramRepository`, `PostgresProgramRepository` |
//! | `PeriodRepository` | `AcademicPeriod` | `InMemoryPeriodRepository`, `PostgresPeriodRepository` |
//! | `CurriculumRepository` | `CurriculumEntry` | `InMemoryCurriculumRepository`, `PostgresCurriculumRepository` |
//! | `OfferingRepository` | `Offering` | `InMemoryOfferingRepository`, `PostgresOfferingRepository` |
//!
//! Repositories are deliberately dumb: they never enforce referential
//! integrity or business rules. `update` and `delete` report a missing row
//! with `Ok(None)`; the use-case layer decides what that means.

// Repository Pattern - Storage Backend Abstraction
//
// - In-memory storage for development/testing
// - PostgreSQL for production persistence

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgConnectOptions;

use crate::domain::curriculum::{CurriculumDraft, CurriculumEntry, CurriculumEntryId, CurriculumKey, RelatedCurriculumEntry};
use crate::domain::offering::{Offering, OfferingDraft, OfferingId, OfferingKey, RelatedOffering};
use crate::domain::period::{AcademicPeriod, PeriodDraft, PeriodId, RelatedPeriod};
use crate::domain::program::{Program, ProgramDraft, ProgramId};
use crate::domain::subject::{Subject, SubjectDraft, SubjectId};

/// Storage backend enum for pluggable persistence
#[derive(Debug, Clone)]
pub enum StorageBackend {
    InMemory,
    PostgreSQL(PostgresConfig),
}

#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub connect_options: PgConnectOptions,
    pub max_connections: u32,
}

/// Repository interface for Subject rows
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// List subjects, optionally capped
    async fn list(&self, limit: Option<i64>) -> Result<Vec<Subject>, RepositoryError>;

    async fn find_by_id(&self, id: SubjectId) -> Result<Option<Subject>, RepositoryError>;

    /// Insert and return the generated id
    async fn create(&self, draft: &SubjectDraft) -> Result<SubjectId, RepositoryError>;

    async fn update(&self, id: SubjectId, draft: &SubjectDraft) -> Result<Option<Subject>, RepositoryError>;

    /// Delete and return the removed row
    async fn delete(&self, id: SubjectId) -> Result<Option<Subject>, RepositoryError>;
}

/// Repository interface for Program rows
#[async_trait]
pub trait ProgramRepository: Send + Sync {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<Program>, RepositoryError>;

    async fn find_by_id(&self, id: ProgramId) -> Result<Option<Program>, RepositoryError>;

    async fn create(&self, draft: &ProgramDraft) -> Result<ProgramId, RepositoryError>;

    async fn update(&self, id: ProgramId, draft: &ProgramDraft) -> Result<Option<Program>, RepositoryError>;

    async fn delete(&self, id: ProgramId) -> Result<Option<Program>, RepositoryError>;
}

/// Repository interface for AcademicPeriod aggregates
#[async_trait]
pub trait PeriodRepository: Send + Sync {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<AcademicPeriod>, RepositoryError>;

    async fn find_by_id(&self, id: PeriodId) -> Result<Option<AcademicPeriod>, RepositoryError>;

    async fn create(&self, draft: &PeriodDraft) -> Result<PeriodId, RepositoryError>;

    async fn update(&self, id: PeriodId, draft: &PeriodDraft) -> Result<Option<AcademicPeriod>, RepositoryError>;

    async fn delete(&self, id: PeriodId) -> Result<Option<AcademicPeriod>, RepositoryError>;

    /// First `Active` period whose inclusive range intersects `[start, end]`,
    /// ignoring `exclude` when given
    async fn find_overlapping(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<PeriodId>,
    ) -> Result<Option<AcademicPeriod>, RepositoryError>;

    /// Period joined with its state name
    async fn find_related(&self, id: PeriodId) -> Result<Option<RelatedPeriod>, RepositoryError>;
}

/// Repository interface for CurriculumEntry rows
#[async_trait]
pub trait CurriculumRepository: Send + Sync {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<CurriculumEntry>, RepositoryError>;

    async fn find_by_id(&self, id: CurriculumEntryId) -> Result<Option<CurriculumEntry>, RepositoryError>;

    async fn create(&self, draft: &CurriculumDraft) -> Result<CurriculumEntryId, RepositoryError>;

    async fn update(
        &self,
        id: CurriculumEntryId,
        draft: &CurriculumDraft,
    ) -> Result<Option<CurriculumEntry>, RepositoryError>;

    async fn delete(&self, id: CurriculumEntryId) -> Result<Option<CurriculumEntry>, RepositoryError>;

    /// Whether another entry already holds `key`
    async fn exists_duplicate(
        &self,
        key: CurriculumKey,
        exclude: Option<CurriculumEntryId>,
    ) -> Result<bool, RepositoryError>;

    async fn find_related(&self, id: CurriculumEntryId) -> Result<Option<RelatedCurriculumEntry>, RepositoryError>;
}

/// Repository interface for Offering rows
#[async_trait]
pub trait OfferingRepository: Send + Sync {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<Offering>, RepositoryError>;

    async fn find_by_id(&self, id: OfferingId) -> Result<Option<Offering>, RepositoryError>;

    async fn create(&self, draft: &OfferingDraft) -> Result<OfferingId, RepositoryError>;

    async fn update(&self, id: OfferingId, draft: &OfferingDraft) -> Result<Option<Offering>, RepositoryError>;

    async fn delete(&self, id: OfferingId) -> Result<Option<Offering>, RepositoryError>;

    /// Whether another offering already holds `key`
    async fn exists_duplicate(&self, key: OfferingKey, exclude: Option<OfferingId>) -> Result<bool, RepositoryError>;

    async fn find_related(&self, id: OfferingId) -> Result<Option<RelatedOffering>, RepositoryError>;
}

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A uniqueness constraint rejected the write
    #[error("{0}")]
    Conflict(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// SQLSTATE for `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE for `foreign_key_violation`
const FOREIGN_KEY_VIOLATION: &str = "23503";

pub const REFERENCED_ROW_MESSAGE: &str = "El registro está relacionado con otras entidades del catálogo";

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound("Row not found".to_string()),
            sqlx::Error::Database(ref db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                RepositoryError::Conflict(conflict_message(db.constraint()))
            }
            sqlx::Error::Database(ref db) if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) => {
                RepositoryError::Conflict(REFERENCED_ROW_MESSAGE.to_string())
            }
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}

fn conflict_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("uq_oferta_grupo") => crate::domain::offering::DUPLICATE_OFFERING_MESSAGE.to_string(),
        Some("uq_planestudio_semestre") => crate::domain::curriculum::DUPLICATE_CURRICULUM_MESSAGE.to_string(),
        Some(other) => format!("Registro duplicado ({})", other),
        None => "Registro duplicado".to_string(),
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}
