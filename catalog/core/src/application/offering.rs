// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Offering Use Cases
//!
//! Application service for scheduling subject groups.
//!
//! # Validation
//!
//! The duplicate query and the three reference lookups (subject, program,
//! period) are issued together and all complete before any of them is
//! inspected. Results are then checked in a fixed order:
//!
//! 1. duplicate (program, period, subject, group) → `BusinessRule`
//! 2. subject missing → `NotFound`
//! 3. program missing → `NotFound`
//! 4. period missing → `NotFound`
//! 5. period not accepting offerings → `BusinessRule` with the state's message
//!
//! On update the duplicate query ignores the offering being updated.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::error::CatalogError;
use crate::domain::offering::{Offering, OfferingDraft, OfferingId, RelatedOffering, DUPLICATE_OFFERING_MESSAGE};
use crate::domain::period::ACTIVE_PERIOD_SENTINEL;
use crate::domain::repository::{OfferingRepository, PeriodRepository, ProgramRepository, SubjectRepository};

pub const OFFERINGS_NOT_FOUND: &str = "No se encontró ninguna oferta";
pub const OFFERING_NOT_FOUND: &str = "No se encontró la oferta buscada";
pub const OFFERING_SUBJECT_NOT_FOUND: &str = "No se encontró la asignatura buscada";
pub const OFFERING_PROGRAM_NOT_FOUND: &str = "No se encontró el programa buscado";
pub const OFFERING_PERIOD_NOT_FOUND: &str = "No se encontró el periodo buscado";

#[async_trait]
pub trait OfferingService: Send + Sync {
    async fn list_offerings(&self, limit: Option<i64>) -> Result<Vec<Offering>, CatalogError>;

    async fn get_offering(&self, id: OfferingId) -> Result<Offering, CatalogError>;

    async fn create_offering(&self, draft: OfferingDraft) -> Result<RelatedOffering, CatalogError>;

    async fn update_offering(&self, id: OfferingId, draft: OfferingDraft) -> Result<RelatedOffering, CatalogError>;

    async fn delete_offering(&self, id: OfferingId) -> Result<Offering, CatalogError>;
}

pub struct StandardOfferingService {
    offerings: Arc<dyn OfferingRepository>,
    subjects: Arc<dyn SubjectRepository>,
    programs: Arc<dyn ProgramRepository>,
    periods: Arc<dyn PeriodRepository>,
}

impl StandardOfferingService {
    pub fn new(
        offerings: Arc<dyn OfferingRepository>,
        subjects: Arc<dyn SubjectRepository>,
        programs: Arc<dyn ProgramRepository>,
        periods: Arc<dyn PeriodRepository>,
    ) -> Self {
        Self {
            offerings,
            subjects,
            programs,
            periods,
        }
    }

    async fn validate(&self, draft: &OfferingDraft, exclude: Option<OfferingId>) -> Result<(), CatalogError> {
        let (duplicate, subject, program, period) = tokio::try_join!(
            self.offerings.exists_duplicate(draft.key(), exclude),
            self.subjects.find_by_id(draft.subject_id),
            self.programs.find_by_id(draft.program_id),
            self.periods.find_by_id(draft.period_id),
        )?;

        if duplicate {
            warn!(
                program_id = %draft.program_id,
                period_id = %draft.period_id,
                subject_id = %draft.subject_id,
                group = draft.group,
                "Rejected duplicate offering"
            );
            return Err(CatalogError::business_rule(DUPLICATE_OFFERING_MESSAGE));
        }
        if subject.is_none() {
            return Err(CatalogError::not_found(OFFERING_SUBJECT_NOT_FOUND));
        }
        if program.is_none() {
            return Err(CatalogError::not_found(OFFERING_PROGRAM_NOT_FOUND));
        }
        let Some(period) = period else {
            return Err(CatalogError::not_found(OFFERING_PERIOD_NOT_FOUND));
        };

        let verdict = period.state.validation_message();
        if verdict != ACTIVE_PERIOD_SENTINEL {
            warn!(period_id = %period.id, state = %period.state, "Rejected offering: period not active");
            return Err(CatalogError::business_rule(verdict));
        }
        Ok(())
    }

    async fn related_view(&self, id: OfferingId) -> Result<RelatedOffering, CatalogError> {
        self.offerings.find_related(id).await?.ok_or_else(|| {
            error!(offering_id = %id, "Offering missing right after a successful write");
            CatalogError::internal(format!("No se pudo recuperar la oferta {} después de guardarla", id))
        })
    }
}

#[async_trait]
impl OfferingService for StandardOfferingService {
    async fn list_offerings(&self, limit: Option<i64>) -> Result<Vec<Offering>, CatalogError> {
        let offerings = self.offerings.list(limit).await?;
        if offerings.is_empty() {
            return Err(CatalogError::not_found(OFFERINGS_NOT_FOUND));
        }
        Ok(offerings)
    }

    async fn get_offering(&self, id: OfferingId) -> Result<Offering, CatalogError> {
        self.offerings
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(OFFERING_NOT_FOUND))
    }

    async fn create_offering(&self, draft: OfferingDraft) -> Result<RelatedOffering, CatalogError> {
        self.validate(&draft, None).await?;

        let id = self.offerings.create(&draft).await?;
        info!(offering_id = %id, period_id = %draft.period_id, group = draft.group, "Offering created");

        self.related_view(id).await
    }

    async fn update_offering(&self, id: OfferingId, draft: OfferingDraft) -> Result<RelatedOffering, CatalogError> {
        self.validate(&draft, Some(id)).await?;

        self.offerings
            .update(id, &draft)
            .await?
            .ok_or_else(|| CatalogError::not_found(OFFERING_NOT_FOUND))?;
        info!(offering_id = %id, "Offering updated");

        self.related_view(id).await
    }

    async fn delete_offering(&self, id: OfferingId) -> Result<Offering, CatalogError> {
        let offering = self
            .offerings
            .delete(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(OFFERING_NOT_FOUND))?;
        info!(offering_id = %id, "Offering deleted");
        Ok(offering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::period::{PeriodDraft, PeriodId, PeriodState};
    use crate::domain::program::{ProgramDraft, ProgramId};
    use crate::domain::repository::RepositoryError;
    use crate::domain::subject::{Subject, SubjectDraft, SubjectId};
    use crate::infrastructure::repositories::InMemoryCatalog;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts subject lookups to observe that validation is eager
    struct CountingSubjects {
        inner: Arc<dyn SubjectRepository>,
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl SubjectRepository for CountingSubjects {
        async fn list(&self, limit: Option<i64>) -> Result<Vec<Subject>, RepositoryError> {
            self.inner.list(limit).await
        }

        async fn find_by_id(&self, id: SubjectId) -> Result<Option<Subject>, RepositoryError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_id(id).await
        }

        async fn create(&self, draft: &SubjectDraft) -> Result<SubjectId, RepositoryError> {
            self.inner.create(draft).await
        }

        async fn update(&self, id: SubjectId, draft: &SubjectDraft) -> Result<Option<Subject>, RepositoryError> {
            self.inner.update(id, draft).await
        }

        async fn delete(&self, id: SubjectId) -> Result<Option<Subject>, RepositoryError> {
            self.inner.delete(id).await
        }
    }

    struct Fixture {
        catalog: InMemoryCatalog,
        subjects: Arc<CountingSubjects>,
        service: StandardOfferingService,
        subject_id: SubjectId,
        program_id: ProgramId,
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    async fn fixture() -> Fixture {
        let catalog = InMemoryCatalog::new();
        let subjects = Arc::new(CountingSubjects {
            inner: Arc::new(catalog.subject_repository()),
            lookups: AtomicUsize::new(0),
        });
        let subject_id = subjects
            .create(&SubjectDraft {
                name: "Física I".to_string(),
                load_hours: 64,
                format_id: 1,
                info: Some("Laboratorio incluido".to_string()),
            })
            .await
            .unwrap();
        let program_id = catalog
            .program_repository()
            .create(&ProgramDraft {
                name: "Ingeniería Civil".to_string(),
                level_id: 1,
                modality_id: 1,
                duration_months: 60,
            })
            .await
            .unwrap();

        let service = StandardOfferingService::new(
            Arc::new(catalog.offering_repository()),
            subjects.clone(),
            Arc::new(catalog.program_repository()),
            Arc::new(catalog.period_repository()),
        );

        Fixture {
            catalog,
            subjects,
            service,
            subject_id,
            program_id,
        }
    }

    impl Fixture {
        async fn period(&self, state: PeriodState) -> PeriodId {
            self.catalog
                .period_repository()
                .create(&PeriodDraft {
                    semester: "2026-1".to_string(),
                    start_date: date("2026-02-01"),
                    end_date: date("2026-06-30"),
                    state,
                })
                .await
                .unwrap()
        }

        fn draft(&self, period_id: PeriodId, group: i32) -> OfferingDraft {
            OfferingDraft {
                program_id: self.program_id,
                period_id,
                subject_id: self.subject_id,
                group,
                capacity: 30,
            }
        }

        async fn stored_offerings(&self) -> usize {
            self.catalog.offering_repository().list(None).await.unwrap().len()
        }
    }

    #[tokio::test]
    async fn test_create_in_active_period_returns_related_view() {
        let f = fixture().await;
        let period_id = f.period(PeriodState::Active).await;

        let view = f.service.create_offering(f.draft(period_id, 1)).await.unwrap();
        assert_eq!(view.semester, "2026-1");
        assert_eq!(view.program_name, "Ingeniería Civil");
        assert_eq!(view.subject_info.as_deref(), Some("Laboratorio incluido"));
        assert_eq!(view.capacity, 30);
    }

    #[tokio::test]
    async fn test_duplicate_is_reported_but_every_lookup_still_runs() {
        let f = fixture().await;
        let period_id = f.period(PeriodState::Active).await;
        f.service.create_offering(f.draft(period_id, 1)).await.unwrap();
        let before = f.subjects.lookups.load(Ordering::SeqCst);

        let err = f.service.create_offering(f.draft(period_id, 1)).await.unwrap_err();
        assert!(matches!(err, CatalogError::BusinessRule(ref m) if m == DUPLICATE_OFFERING_MESSAGE));
        assert_eq!(f.subjects.lookups.load(Ordering::SeqCst), before + 1);
        assert_eq!(f.stored_offerings().await, 1);
    }

    #[tokio::test]
    async fn test_missing_references_are_not_found_in_order() {
        let f = fixture().await;
        let period_id = f.period(PeriodState::Active).await;

        let mut draft = f.draft(period_id, 1);
        draft.subject_id = SubjectId(99);
        draft.program_id = ProgramId(99);
        let err = f.service.create_offering(draft).await.unwrap_err();
        assert_eq!(err.to_string(), OFFERING_SUBJECT_NOT_FOUND);

        let mut draft = f.draft(period_id, 1);
        draft.program_id = ProgramId(99);
        draft.period_id = PeriodId(99);
        let err = f.service.create_offering(draft).await.unwrap_err();
        assert_eq!(err.to_string(), OFFERING_PROGRAM_NOT_FOUND);

        let err = f.service.create_offering(f.draft(PeriodId(99), 1)).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(ref m) if m == OFFERING_PERIOD_NOT_FOUND));

        assert_eq!(f.stored_offerings().await, 0);
    }

    #[tokio::test]
    async fn test_preparing_and_closed_periods_reject_offerings() {
        let f = fixture().await;

        let preparing = f.period(PeriodState::Preparing).await;
        let err = f.service.create_offering(f.draft(preparing, 1)).await.unwrap_err();
        assert!(matches!(err, CatalogError::BusinessRule(ref m) if m.contains("preparacion")));

        let closed = f.period(PeriodState::Closed).await;
        let err = f.service.create_offering(f.draft(closed, 1)).await.unwrap_err();
        assert_eq!(err.to_string(), "El periodo está cerrado");

        assert_eq!(f.stored_offerings().await, 0);
    }

    #[tokio::test]
    async fn test_update_keeps_own_tuple_and_rejects_collisions() {
        let f = fixture().await;
        let period_id = f.period(PeriodState::Active).await;
        let first = f.service.create_offering(f.draft(period_id, 1)).await.unwrap();
        f.service.create_offering(f.draft(period_id, 2)).await.unwrap();

        let mut bigger = f.draft(period_id, 1);
        bigger.capacity = 45;
        let view = f.service.update_offering(first.id, bigger).await.unwrap();
        assert_eq!(view.capacity, 45);

        let err = f.service.update_offering(first.id, f.draft(period_id, 2)).await.unwrap_err();
        assert!(matches!(err, CatalogError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn test_update_missing_offering_is_not_found() {
        let f = fixture().await;
        let period_id = f.period(PeriodState::Active).await;
        let err = f
            .service
            .update_offering(OfferingId(5), f.draft(period_id, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(ref m) if m == OFFERING_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_delete_returns_offering() {
        let f = fixture().await;
        let period_id = f.period(PeriodState::Active).await;
        let view = f.service.create_offering(f.draft(period_id, 3)).await.unwrap();

        let removed = f.service.delete_offering(view.id).await.unwrap();
        assert_eq!(removed.group, 3);
        assert!(matches!(f.service.list_offerings(None).await, Err(CatalogError::NotFound(_))));
    }
}
