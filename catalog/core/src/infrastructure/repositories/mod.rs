// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! Infrastructure implementations of the repository ports defined in
//! `crate::domain::repository`.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Persist and retrieve catalog entities
//! - **Pattern:** Repository (DDD), Adapter (Hexagonal Architecture)
//!
//! # Available Implementations
//!
//! ## PostgreSQL Repositories
//!
//! - **PostgresSubjectRepository** - `asignatura`
//! - **PostgresProgramRepository** - `programaacademico`
//! - **PostgresPeriodRepository** - `periodoacademico` (+ state names)
//! - **PostgresCurriculumRepository** - `planestudio`
//! - **PostgresOfferingRepository** - `oferta`
//!
//! ## In-Memory Repositories
//!
//! Lightweight implementations for tests and the `memory` storage backend.
//! All five share one [`InMemoryCatalog`] so joined views and referential
//! checks see the same data. The store mirrors the relational schema's
//! UNIQUE and foreign-key constraints, reporting violations as
//! `RepositoryError::Conflict` just like the PostgreSQL adapters.
//!
//! # Usage
//!
//! ```no_run
//! use academium_core::infrastructure::repositories::InMemoryCatalog;
//!
//! let catalog = InMemoryCatalog::new();
//! let subjects = catalog.subject_repository();
//! let offerings = catalog.offering_repository();
//! ```

pub mod postgres_curriculum;
pub mod postgres_offering;
pub mod postgres_period;
pub mod postgres_program;
pub mod postgres_subject;

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::curriculum::{
    CurriculumDraft, CurriculumEntry, CurriculumEntryId, CurriculumKey, RelatedCurriculumEntry,
    DUPLICATE_CURRICULUM_MESSAGE,
};
use crate::domain::offering::{
    Offering, OfferingDraft, OfferingId, OfferingKey, RelatedOffering, DUPLICATE_OFFERING_MESSAGE,
};
use crate::domain::period::{AcademicPeriod, PeriodDraft, PeriodId, RelatedPeriod};
use crate::domain::program::{Program, ProgramDraft, ProgramId};
use crate::domain::repository::{
    CurriculumRepository, OfferingRepository, PeriodRepository, ProgramRepository, RepositoryError,
    SubjectRepository, REFERENCED_ROW_MESSAGE,
};
use crate::domain::subject::{Subject, SubjectDraft, SubjectId};

/// One table keyed by its serial id, with its own sequence
#[derive(Debug)]
struct Table<K, V> {
    rows: BTreeMap<K, V>,
    next_id: i32,
}

impl<K: Ord, V: Clone> Table<K, V> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn next_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Rows in id order, capped like SQL `LIMIT`
    fn list(&self, limit: Option<i64>) -> Vec<V> {
        let cap = limit.map(|l| l.max(0) as usize).unwrap_or(usize::MAX);
        self.rows.values().take(cap).cloned().collect()
    }
}

#[derive(Debug)]
struct CatalogTables {
    subjects: Table<SubjectId, Subject>,
    programs: Table<ProgramId, Program>,
    periods: Table<PeriodId, AcademicPeriod>,
    curriculum: Table<CurriculumEntryId, CurriculumEntry>,
    offerings: Table<OfferingId, Offering>,
}

impl CatalogTables {
    fn new() -> Self {
        Self {
            subjects: Table::new(),
            programs: Table::new(),
            periods: Table::new(),
            curriculum: Table::new(),
            offerings: Table::new(),
        }
    }

    fn curriculum_taken(&self, key: CurriculumKey, exclude: Option<CurriculumEntryId>) -> bool {
        self.curriculum
            .rows
            .values()
            .any(|e| e.key() == key && Some(e.id) != exclude)
    }

    fn offering_taken(&self, key: OfferingKey, exclude: Option<OfferingId>) -> bool {
        self.offerings
            .rows
            .values()
            .any(|o| o.key() == key && Some(o.id) != exclude)
    }

    fn check_curriculum_refs(&self, draft: &CurriculumDraft) -> Result<(), RepositoryError> {
        if !self.programs.rows.contains_key(&draft.program_id) || !self.subjects.rows.contains_key(&draft.subject_id) {
            return Err(RepositoryError::Conflict(REFERENCED_ROW_MESSAGE.to_string()));
        }
        Ok(())
    }

    fn check_offering_refs(&self, draft: &OfferingDraft) -> Result<(), RepositoryError> {
        if !self.programs.rows.contains_key(&draft.program_id)
            || !self.periods.rows.contains_key(&draft.period_id)
            || !self.subjects.rows.contains_key(&draft.subject_id)
        {
            return Err(RepositoryError::Conflict(REFERENCED_ROW_MESSAGE.to_string()));
        }
        Ok(())
    }
}

/// Shared in-memory store backing all five in-memory repositories
#[derive(Clone)]
pub struct InMemoryCatalog {
    tables: Arc<RwLock<CatalogTables>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(CatalogTables::new())),
        }
    }

    pub fn subject_repository(&self) -> InMemorySubjectRepository {
        InMemorySubjectRepository { tables: self.tables.clone() }
    }

    pub fn program_repository(&self) -> InMemoryProgramRepository {
        InMemoryProgramRepository { tables: self.tables.clone() }
    }

    pub fn period_repository(&self) -> InMemoryPeriodRepository {
        InMemoryPeriodRepository { tables: self.tables.clone() }
    }

    pub fn curriculum_repository(&self) -> InMemoryCurriculumRepository {
        InMemoryCurriculumRepository { tables: self.tables.clone() }
    }

    pub fn offering_repository(&self) -> InMemoryOfferingRepository {
        InMemoryOfferingRepository { tables: self.tables.clone() }
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct InMemorySubjectRepository {
    tables: Arc<RwLock<CatalogTables>>,
}

#[async_trait]
impl SubjectRepository for InMemorySubjectRepository {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<Subject>, RepositoryError> {
        Ok(self.tables.read().subjects.list(limit))
    }

    async fn find_by_id(&self, id: SubjectId) -> Result<Option<Subject>, RepositoryError> {
        Ok(self.tables.read().subjects.rows.get(&id).cloned())
    }

    async fn create(&self, draft: &SubjectDraft) -> Result<SubjectId, RepositoryError> {
        let mut tables = self.tables.write();
        let id = SubjectId(tables.subjects.next_id());
        tables.subjects.rows.insert(id, draft.clone().into_subject(id));
        Ok(id)
    }

    async fn update(&self, id: SubjectId, draft: &SubjectDraft) -> Result<Option<Subject>, RepositoryError> {
        let mut tables = self.tables.write();
        let Some(row) = tables.subjects.rows.get_mut(&id) else {
            return Ok(None);
        };
        *row = draft.clone().into_subject(id);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: SubjectId) -> Result<Option<Subject>, RepositoryError> {
        let mut tables = self.tables.write();
        let referenced = tables.curriculum.rows.values().any(|e| e.subject_id == id)
            || tables.offerings.rows.values().any(|o| o.subject_id == id);
        if referenced {
            return Err(RepositoryError::Conflict(REFERENCED_ROW_MESSAGE.to_string()));
        }
        Ok(tables.subjects.rows.remove(&id))
    }
}

#[derive(Clone)]
pub struct InMemoryProgramRepository {
    tables: Arc<RwLock<CatalogTables>>,
}

#[async_trait]
impl ProgramRepository for InMemoryProgramRepository {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<Program>, RepositoryError> {
        Ok(self.tables.read().programs.list(limit))
    }

    async fn find_by_id(&self, id: ProgramId) -> Result<Option<Program>, RepositoryError> {
        Ok(self.tables.read().programs.rows.get(&id).cloned())
    }

    async fn create(&self, draft: &ProgramDraft) -> Result<ProgramId, RepositoryError> {
        let mut tables = self.tables.write();
        let id = ProgramId(tables.programs.next_id());
        tables.programs.rows.insert(id, draft.clone().into_program(id));
        Ok(id)
    }

    async fn update(&self, id: ProgramId, draft: &ProgramDraft) -> Result<Option<Program>, RepositoryError> {
        let mut tables = self.tables.write();
        let Some(row) = tables.programs.rows.get_mut(&id) else {
            return Ok(None);
        };
        *row = draft.clone().into_program(id);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: ProgramId) -> Result<Option<Program>, RepositoryError> {
        let mut tables = self.tables.write();
        let referenced = tables.curriculum.rows.values().any(|e| e.program_id == id)
            || tables.offerings.rows.values().any(|o| o.program_id == id);
        if referenced {
            return Err(RepositoryError::Conflict(REFERENCED_ROW_MESSAGE.to_string()));
        }
        Ok(tables.programs.rows.remove(&id))
    }
}

#[derive(Clone)]
pub struct InMemoryPeriodRepository {
    tables: Arc<RwLock<CatalogTables>>,
}

#[async_trait]
impl PeriodRepository for InMemoryPeriodRepository {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<AcademicPeriod>, RepositoryError> {
        Ok(self.tables.read().periods.list(limit))
    }

    async fn find_by_id(&self, id: PeriodId) -> Result<Option<AcademicPeriod>, RepositoryError> {
        Ok(self.tables.read().periods.rows.get(&id).cloned())
    }

    async fn create(&self, draft: &PeriodDraft) -> Result<PeriodId, RepositoryError> {
        let mut tables = self.tables.write();
        let id = PeriodId(tables.periods.next_id());
        tables.periods.rows.insert(id, draft.clone().into_period(id));
        Ok(id)
    }

    async fn update(&self, id: PeriodId, draft: &PeriodDraft) -> Result<Option<AcademicPeriod>, RepositoryError> {
        let mut tables = self.tables.write();
        let Some(row) = tables.periods.rows.get_mut(&id) else {
            return Ok(None);
        };
        *row = draft.clone().into_period(id);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: PeriodId) -> Result<Option<AcademicPeriod>, RepositoryError> {
        let mut tables = self.tables.write();
        if tables.offerings.rows.values().any(|o| o.period_id == id) {
            return Err(RepositoryError::Conflict(REFERENCED_ROW_MESSAGE.to_string()));
        }
        Ok(tables.periods.rows.remove(&id))
    }

    async fn find_overlapping(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<PeriodId>,
    ) -> Result<Option<AcademicPeriod>, RepositoryError> {
        let tables = self.tables.read();
        Ok(tables
            .periods
            .rows
            .values()
            .find(|p| p.is_active() && Some(p.id) != exclude && p.overlaps(start, end))
            .cloned())
    }

    async fn find_related(&self, id: PeriodId) -> Result<Option<RelatedPeriod>, RepositoryError> {
        Ok(self.tables.read().periods.rows.get(&id).map(RelatedPeriod::from))
    }
}

#[derive(Clone)]
pub struct InMemoryCurriculumRepository {
    tables: Arc<RwLock<CatalogTables>>,
}

#[async_trait]
impl CurriculumRepository for InMemoryCurriculumRepository {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<CurriculumEntry>, RepositoryError> {
        Ok(self.tables.read().curriculum.list(limit))
    }

    async fn find_by_id(&self, id: CurriculumEntryId) -> Result<Option<CurriculumEntry>, RepositoryError> {
        Ok(self.tables.read().curriculum.rows.get(&id).cloned())
    }

    async fn create(&self, draft: &CurriculumDraft) -> Result<CurriculumEntryId, RepositoryError> {
        let mut tables = self.tables.write();
        if tables.curriculum_taken(draft.key(), None) {
            return Err(RepositoryError::Conflict(DUPLICATE_CURRICULUM_MESSAGE.to_string()));
        }
        tables.check_curriculum_refs(draft)?;
        let id = CurriculumEntryId(tables.curriculum.next_id());
        tables.curriculum.rows.insert(id, draft.clone().into_entry(id));
        Ok(id)
    }

    async fn update(
        &self,
        id: CurriculumEntryId,
        draft: &CurriculumDraft,
    ) -> Result<Option<CurriculumEntry>, RepositoryError> {
        let mut tables = self.tables.write();
        if !tables.curriculum.rows.contains_key(&id) {
            return Ok(None);
        }
        if tables.curriculum_taken(draft.key(), Some(id)) {
            return Err(RepositoryError::Conflict(DUPLICATE_CURRICULUM_MESSAGE.to_string()));
        }
        tables.check_curriculum_refs(draft)?;
        let entry = draft.clone().into_entry(id);
        tables.curriculum.rows.insert(id, entry.clone());
        Ok(Some(entry))
    }

    async fn delete(&self, id: CurriculumEntryId) -> Result<Option<CurriculumEntry>, RepositoryError> {
        Ok(self.tables.write().curriculum.rows.remove(&id))
    }

    async fn exists_duplicate(
        &self,
        key: CurriculumKey,
        exclude: Option<CurriculumEntryId>,
    ) -> Result<bool, RepositoryError> {
        Ok(self.tables.read().curriculum_taken(key, exclude))
    }

    async fn find_related(&self, id: CurriculumEntryId) -> Result<Option<RelatedCurriculumEntry>, RepositoryError> {
        let tables = self.tables.read();
        let Some(entry) = tables.curriculum.rows.get(&id) else {
            return Ok(None);
        };
        // Inner join semantics: a dangling reference yields no row
        let (Some(program), Some(subject)) = (
            tables.programs.rows.get(&entry.program_id),
            tables.subjects.rows.get(&entry.subject_id),
        ) else {
            return Ok(None);
        };

        Ok(Some(RelatedCurriculumEntry {
            id: entry.id,
            program_name: program.name.clone(),
            subject_name: subject.name.clone(),
            semester: entry.semester,
            credits: entry.credits,
        }))
    }
}

#[derive(Clone)]
pub struct InMemoryOfferingRepository {
    tables: Arc<RwLock<CatalogTables>>,
}

#[async_trait]
impl OfferingRepository for InMemoryOfferingRepository {
    async fn list(&self, limit: Option<i64>) -> Result<Vec<Offering>, RepositoryError> {
        Ok(self.tables.read().offerings.list(limit))
    }

    async fn find_by_id(&self, id: OfferingId) -> Result<Option<Offering>, RepositoryError> {
        Ok(self.tables.read().offerings.rows.get(&id).cloned())
    }

    async fn create(&self, draft: &OfferingDraft) -> Result<OfferingId, RepositoryError> {
        let mut tables = self.tables.write();
        if tables.offering_taken(draft.key(), None) {
            return Err(RepositoryError::Conflict(DUPLICATE_OFFERING_MESSAGE.to_string()));
        }
        tables.check_offering_refs(draft)?;
        let id = OfferingId(tables.offerings.next_id());
        tables.offerings.rows.insert(id, draft.clone().into_offering(id));
        Ok(id)
    }

    async fn update(&self, id: OfferingId, draft: &OfferingDraft) -> Result<Option<Offering>, RepositoryError> {
        let mut tables = self.tables.write();
        if !tables.offerings.rows.contains_key(&id) {
            return Ok(None);
        }
        if tables.offering_taken(draft.key(), Some(id)) {
            return Err(RepositoryError::Conflict(DUPLICATE_OFFERING_MESSAGE.to_string()));
        }
        tables.check_offering_refs(draft)?;
        let offering = draft.clone().into_offering(id);
        tables.offerings.rows.insert(id, offering.clone());
        Ok(Some(offering))
    }

    async fn delete(&self, id: OfferingId) -> Result<Option<Offering>, RepositoryError> {
        Ok(self.tables.write().offerings.rows.remove(&id))
    }

    async fn exists_duplicate(&self, key: OfferingKey, exclude: Option<OfferingId>) -> Result<bool, RepositoryError> {
        Ok(self.tables.read().offering_taken(key, exclude))
    }

    async fn find_related(&self, id: OfferingId) -> Result<Option<RelatedOffering>, RepositoryError> {
        let tables = self.tables.read();
        let Some(offering) = tables.offerings.rows.get(&id) else {
            return Ok(None);
        };
        let (Some(program), Some(period), Some(subject)) = (
            tables.programs.rows.get(&offering.program_id),
            tables.periods.rows.get(&offering.period_id),
            tables.subjects.rows.get(&offering.subject_id),
        ) else {
            return Ok(None);
        };

        Ok(Some(RelatedOffering {
            id: offering.id,
            program_name: program.name.clone(),
            semester: period.semester.clone(),
            subject_name: subject.name.clone(),
            subject_info: subject.info.clone(),
            group: offering.group,
            capacity: offering.capacity,
        }))
    }
}
