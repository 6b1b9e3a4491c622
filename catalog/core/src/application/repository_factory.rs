// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Repository Factory - Application Layer
//!
//! Creates concrete repository implementations based on storage backend
//! configuration, keeping the domain layer free of infrastructure types.
//!
//! - Domain layer: defines repository traits
//! - Application layer: selects implementations (this module)
//! - Infrastructure layer: provides the implementations

use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repository::{
    CurriculumRepository, OfferingRepository, PeriodRepository, ProgramRepository, StorageBackend,
    SubjectRepository,
};
use crate::infrastructure::repositories::postgres_curriculum::PostgresCurriculumRepository;
use crate::infrastructure::repositories::postgres_offering::PostgresOfferingRepository;
use crate::infrastructure::repositories::postgres_period::PostgresPeriodRepository;
use crate::infrastructure::repositories::postgres_program::PostgresProgramRepository;
use crate::infrastructure::repositories::postgres_subject::PostgresSubjectRepository;
use crate::infrastructure::repositories::InMemoryCatalog;

/// One repository per catalog entity, all over the same backend
#[derive(Clone)]
pub struct CatalogRepositories {
    pub subjects: Arc<dyn SubjectRepository>,
    pub programs: Arc<dyn ProgramRepository>,
    pub periods: Arc<dyn PeriodRepository>,
    pub curriculum: Arc<dyn CurriculumRepository>,
    pub offerings: Arc<dyn OfferingRepository>,
}

impl CatalogRepositories {
    pub fn in_memory() -> Self {
        let catalog = InMemoryCatalog::new();
        Self {
            subjects: Arc::new(catalog.subject_repository()),
            programs: Arc::new(catalog.program_repository()),
            periods: Arc::new(catalog.period_repository()),
            curriculum: Arc::new(catalog.curriculum_repository()),
            offerings: Arc::new(catalog.offering_repository()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            subjects: Arc::new(PostgresSubjectRepository::new(pool.clone())),
            programs: Arc::new(PostgresProgramRepository::new(pool.clone())),
            periods: Arc::new(PostgresPeriodRepository::new(pool.clone())),
            curriculum: Arc::new(PostgresCurriculumRepository::new(pool.clone())),
            offerings: Arc::new(PostgresOfferingRepository::new(pool)),
        }
    }
}

/// Creates the repository set for the configured backend.
///
/// The PostgreSQL backend needs a connected pool.
pub fn create_repositories(backend: &StorageBackend, pool: Option<PgPool>) -> Result<CatalogRepositories> {
    match (backend, pool) {
        (StorageBackend::InMemory, _) => Ok(CatalogRepositories::in_memory()),
        (StorageBackend::PostgreSQL(_), Some(pool)) => Ok(CatalogRepositories::postgres(pool)),
        (StorageBackend::PostgreSQL(_), None) => {
            anyhow::bail!("PostgreSQL storage backend selected but no connection pool was provided")
        }
    }
}
