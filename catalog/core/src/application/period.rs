// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Academic Period Use Cases
//!
//! Application service for the period lifecycle.
//!
//! # Flow: create
//!
//! 1. Reject `Closed` as an initial state
//! 2. Reject an inverted date range
//! 3. Query for an `Active` period intersecting the candidate range
//! 4. Persist and return the joined [`RelatedPeriod`] view
//!
//! # Flow: update
//!
//! 1. Load the stored period (`NotFound` if absent)
//! 2. If the target state is `Active`, run the overlap query excluding the
//!    period itself
//! 3. Validate the transition stored state → target state
//! 4. Persist (full replacement) and return the joined view
//!
//! The overlap query and the write are separate round trips; two concurrent
//! activations of intersecting periods can both pass step 2.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::error::CatalogError;
use crate::domain::period::{AcademicPeriod, PeriodDraft, PeriodError, PeriodId, PeriodState, RelatedPeriod};
use crate::domain::repository::PeriodRepository;

pub const PERIODS_NOT_FOUND: &str = "No se encontró ningún periodo académico";
pub const PERIOD_NOT_FOUND: &str = "No se encontró el periodo buscado";

#[async_trait]
pub trait PeriodService: Send + Sync {
    async fn list_periods(&self, limit: Option<i64>) -> Result<Vec<AcademicPeriod>, CatalogError>;

    async fn get_period(&self, id: PeriodId) -> Result<AcademicPeriod, CatalogError>;

    /// Create a period in `Preparing` or `Active` state
    ///
    /// # Errors
    ///
    /// - `BusinessRule`: closed initial state, inverted range, or an
    ///   intersecting `Active` period
    async fn create_period(&self, draft: PeriodDraft) -> Result<RelatedPeriod, CatalogError>;

    /// Replace a period, enforcing the forward-only lifecycle
    ///
    /// # Errors
    ///
    /// - `NotFound`: no period with `id`
    /// - `BusinessRule`: overlap with another `Active` period, or a
    ///   disallowed state transition
    async fn update_period(&self, id: PeriodId, draft: PeriodDraft) -> Result<RelatedPeriod, CatalogError>;

    async fn delete_period(&self, id: PeriodId) -> Result<AcademicPeriod, CatalogError>;
}

pub struct StandardPeriodService {
    repository: Arc<dyn PeriodRepository>,
}

impl StandardPeriodService {
    pub fn new(repository: Arc<dyn PeriodRepository>) -> Self {
        Self { repository }
    }

    async fn ensure_no_active_overlap(
        &self,
        draft: &PeriodDraft,
        exclude: Option<PeriodId>,
    ) -> Result<(), CatalogError> {
        if let Some(conflict) = self
            .repository
            .find_overlapping(draft.start_date, draft.end_date, exclude)
            .await?
        {
            warn!(
                conflicting_period = %conflict.id,
                semester = %draft.semester,
                "Rejected period: overlaps an active period"
            );
            return Err(conflict.overlap_error().into());
        }
        Ok(())
    }

    async fn related_view(&self, id: PeriodId) -> Result<RelatedPeriod, CatalogError> {
        self.repository.find_related(id).await?.ok_or_else(|| {
            error!(period_id = %id, "Period row missing right after a successful write");
            CatalogError::internal(format!("No se pudo recuperar el periodo {} después de guardarlo", id))
        })
    }
}

#[async_trait]
impl PeriodService for StandardPeriodService {
    async fn list_periods(&self, limit: Option<i64>) -> Result<Vec<AcademicPeriod>, CatalogError> {
        let periods = self.repository.list(limit).await?;
        if periods.is_empty() {
            return Err(CatalogError::not_found(PERIODS_NOT_FOUND));
        }
        Ok(periods)
    }

    async fn get_period(&self, id: PeriodId) -> Result<AcademicPeriod, CatalogError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(PERIOD_NOT_FOUND))
    }

    async fn create_period(&self, draft: PeriodDraft) -> Result<RelatedPeriod, CatalogError> {
        if !draft.state.is_valid_initial() {
            warn!(state = %draft.state, "Rejected period: invalid initial state");
            return Err(PeriodError::InvalidInitialState(draft.state).into());
        }
        draft.check_range()?;

        self.ensure_no_active_overlap(&draft, None).await?;

        let id = self.repository.create(&draft).await?;
        info!(period_id = %id, semester = %draft.semester, state = %draft.state, "Academic period created");

        self.related_view(id).await
    }

    async fn update_period(&self, id: PeriodId, draft: PeriodDraft) -> Result<RelatedPeriod, CatalogError> {
        let existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(PERIOD_NOT_FOUND))?;
        draft.check_range()?;

        if draft.state == PeriodState::Active {
            self.ensure_no_active_overlap(&draft, Some(id)).await?;
        }

        if let Err(e) = existing.state.ensure_transition(draft.state) {
            warn!(period_id = %id, from = %existing.state, to = %draft.state, "Rejected period state transition");
            return Err(e.into());
        }

        self.repository
            .update(id, &draft)
            .await?
            .ok_or_else(|| CatalogError::not_found(PERIOD_NOT_FOUND))?;
        info!(period_id = %id, from = %existing.state, to = %draft.state, "Academic period updated");

        self.related_view(id).await
    }

    async fn delete_period(&self, id: PeriodId) -> Result<AcademicPeriod, CatalogError> {
        let period = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(PERIOD_NOT_FOUND))?;
        info!(period_id = %id, "Academic period deleted");
        Ok(period)
    }
}
