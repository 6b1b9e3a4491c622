// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Academic Period Aggregate
//!
//! A dated term (usually a semester) whose lifecycle state decides whether
//! offerings may be scheduled against it.
//!
//! ## Lifecycle
//!
//! ```text
//! Preparing ──▶ Active ──▶ Closed
//!     └──────────────────────▲
//! ```
//!
//! Transitions only move forward; every state may also "transition" to
//! itself so that updates which leave the state untouched are accepted.
//! A period is never reopened.
//!
//! ## Temporal invariant
//!
//! No two `Active` periods may have intersecting inclusive date ranges.
//! The check itself is a repository query (`PeriodRepository::find_overlapping`);
//! [`AcademicPeriod::overlaps`] is the in-memory statement of the same predicate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::error::CatalogError;

// ============================================================================
// Value Objects
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodId(pub i32);

impl std::fmt::Display for PeriodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message a period state reports when an offering is validated against it.
/// Only this value lets an offering through.
pub const ACTIVE_PERIOD_SENTINEL: &str = "periodo activo";

/// Period lifecycle state. Discriminants match the `estadoperiodoacademico`
/// lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum PeriodState {
    Preparing = 1,
    Active = 2,
    Closed = 3,
}

impl PeriodState {
    pub const ALL: [PeriodState; 3] = [Self::Preparing, Self::Active, Self::Closed];

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.id() == id)
    }

    /// Human-readable name, as stored in the lookup table
    pub fn name(self) -> &'static str {
        match self {
            Self::Preparing => "Preparación",
            Self::Active => "Activo",
            Self::Closed => "Cerrado",
        }
    }

    /// Outcome of checking whether offerings can be attached to a period in
    /// this state. Equals [`ACTIVE_PERIOD_SENTINEL`] only for `Active`.
    pub fn validation_message(self) -> &'static str {
        match self {
            Self::Preparing => "El periodo está en preparacion",
            Self::Active => ACTIVE_PERIOD_SENTINEL,
            Self::Closed => "El periodo está cerrado",
        }
    }

    pub fn can_transition_to(self, target: PeriodState) -> bool {
        use PeriodState::*;
        matches!(
            (self, target),
            (Preparing, Preparing | Active | Closed) | (Active, Active | Closed) | (Closed, Closed)
        )
    }

    pub fn ensure_transition(self, target: PeriodState) -> Result<(), PeriodError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(PeriodError::InvalidStateTransition { from: self, to: target })
        }
    }

    /// States a period may be created in
    pub fn is_valid_initial(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

impl std::fmt::Display for PeriodState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<PeriodState> for i32 {
    fn from(state: PeriodState) -> Self {
        state.id()
    }
}

impl TryFrom<i32> for PeriodState {
    type Error = String;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or_else(|| format!("Estado de periodo desconocido: {}", id))
    }
}

/// Date rendering used in business-rule messages
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

// ============================================================================
// Aggregate Root: AcademicPeriod
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicPeriod {
    #[serde(rename = "idPeriodo")]
    pub id: PeriodId,

    /// Term label, e.g. "2026-1"
    #[serde(rename = "semestre")]
    pub semester: String,

    #[serde(rename = "fechaInicio")]
    pub start_date: NaiveDate,

    #[serde(rename = "fechaFin")]
    pub end_date: NaiveDate,

    #[serde(rename = "idEstado")]
    pub state: PeriodState,
}

impl AcademicPeriod {
    pub fn is_active(&self) -> bool {
        self.state == PeriodState::Active
    }

    /// Inclusive range intersection: `self.start ≤ end ∧ self.end ≥ start`
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }

    pub fn overlap_error(&self) -> PeriodError {
        PeriodError::ActiveOverlap {
            period_id: self.id,
            start: self.start_date,
            end: self.end_date,
        }
    }
}

/// Validated write payload. Full replacement on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodDraft {
    pub semester: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub state: PeriodState,
}

impl PeriodDraft {
    pub fn into_period(self, id: PeriodId) -> AcademicPeriod {
        AcademicPeriod {
            id,
            semester: self.semester,
            start_date: self.start_date,
            end_date: self.end_date,
            state: self.state,
        }
    }

    /// Invariants a draft must hold before it reaches the store.
    pub fn check_range(&self) -> Result<(), PeriodError> {
        if self.start_date > self.end_date {
            return Err(PeriodError::InvertedRange);
        }
        Ok(())
    }
}

/// Period joined with its state name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedPeriod {
    #[serde(rename = "idPeriodo")]
    pub id: PeriodId,

    #[serde(rename = "semestre")]
    pub semester: String,

    #[serde(rename = "fechaInicio")]
    pub start_date: NaiveDate,

    #[serde(rename = "fechaFin")]
    pub end_date: NaiveDate,

    #[serde(rename = "estadoPeriodo")]
    pub state_name: String,
}

impl From<&AcademicPeriod> for RelatedPeriod {
    fn from(period: &AcademicPeriod) -> Self {
        Self {
            id: period.id,
            semester: period.semester.clone(),
            start_date: period.start_date,
            end_date: period.end_date,
            state_name: period.state.name().to_string(),
        }
    }
}

// ============================================================================
// Domain Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("Transición de estado no permitida: de {from} a {to}")]
    InvalidStateTransition { from: PeriodState, to: PeriodState },

    #[error(
        "Se encontró un periodo activo con una fecha traslapada: idPeriodo {period_id} periodo desde {} hasta {}",
        day(.start),
        day(.end)
    )]
    ActiveOverlap {
        period_id: PeriodId,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Un periodo académico no puede crearse en estado {0}")]
    InvalidInitialState(PeriodState),

    #[error("La fecha de inicio no puede ser mayor que la fecha de fin")]
    InvertedRange,
}

fn day(date: &NaiveDate) -> String {
    format_date(*date)
}

impl From<PeriodError> for CatalogError {
    fn from(err: PeriodError) -> Self {
        CatalogError::BusinessRule(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PeriodState::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn period(id: i32, start: &str, end: &str, state: PeriodState) -> AcademicPeriod {
        AcademicPeriod {
            id: PeriodId(id),
            semester: "2026-1".to_string(),
            start_date: date(start),
            end_date: date(end),
            state,
        }
    }

    #[test]
    fn test_preparing_may_move_anywhere() {
        for target in PeriodState::ALL {
            assert!(Preparing.can_transition_to(target), "Preparing -> {:?}", target);
        }
    }

    #[test]
    fn test_active_cannot_go_back_to_preparing() {
        assert!(Active.can_transition_to(Active));
        assert!(Active.can_transition_to(Closed));
        assert_eq!(
            Active.ensure_transition(Preparing),
            Err(PeriodError::InvalidStateTransition { from: Active, to: Preparing })
        );
    }

    #[test]
    fn test_closed_is_terminal() {
        assert!(Closed.can_transition_to(Closed));
        assert!(!Closed.can_transition_to(Preparing));
        assert!(!Closed.can_transition_to(Active));
    }

    #[test]
    fn test_transition_error_names_both_states() {
        let msg = Closed.ensure_transition(Active).unwrap_err().to_string();
        assert_eq!(msg, "Transición de estado no permitida: de Cerrado a Activo");
    }

    #[test]
    fn test_only_active_reports_sentinel() {
        assert_eq!(Active.validation_message(), ACTIVE_PERIOD_SENTINEL);
        assert_ne!(Preparing.validation_message(), ACTIVE_PERIOD_SENTINEL);
        assert_ne!(Closed.validation_message(), ACTIVE_PERIOD_SENTINEL);
        assert!(Preparing.validation_message().contains("preparacion"));
    }

    #[test]
    fn test_state_ids_round_trip_through_lookup_table_ids() {
        assert_eq!(PeriodState::from_id(1), Some(Preparing));
        assert_eq!(PeriodState::from_id(2), Some(Active));
        assert_eq!(PeriodState::from_id(3), Some(Closed));
        assert_eq!(PeriodState::from_id(4), None);
        assert!(PeriodState::try_from(0).is_err());
    }

    #[test]
    fn test_closed_is_not_a_valid_initial_state() {
        assert!(Preparing.is_valid_initial());
        assert!(Active.is_valid_initial());
        assert!(!Closed.is_valid_initial());
    }

    #[test]
    fn test_overlap_is_inclusive_on_both_ends() {
        let p = period(1, "2026-02-01", "2026-06-30", Active);
        assert!(p.overlaps(date("2026-06-30"), date("2026-12-15")));
        assert!(p.overlaps(date("2025-12-01"), date("2026-02-01")));
        assert!(p.overlaps(date("2026-03-01"), date("2026-04-01")));
        assert!(!p.overlaps(date("2026-07-01"), date("2026-12-15")));
        assert!(!p.overlaps(date("2025-07-01"), date("2026-01-31")));
    }

    #[test]
    fn test_overlap_message_reports_id_and_dates() {
        let p = period(7, "2026-02-01", "2026-06-30", Active);
        let msg = p.overlap_error().to_string();
        assert!(msg.contains("traslapada"));
        assert!(msg.contains("idPeriodo 7"));
        assert!(msg.contains("desde 2026-02-01 hasta 2026-06-30"));
    }

    #[test]
    fn test_period_serializes_state_as_numeric_id() {
        let json = serde_json::to_value(period(1, "2026-02-01", "2026-06-30", Active)).unwrap();
        assert_eq!(json["idEstado"], 2);
        assert_eq!(json["fechaInicio"], "2026-02-01");
    }

    #[test]
    fn test_draft_rejects_inverted_range() {
        let draft = PeriodDraft {
            semester: "2026-1".to_string(),
            start_date: date("2026-06-30"),
            end_date: date("2026-02-01"),
            state: Preparing,
        };
        assert_eq!(draft.check_range(), Err(PeriodError::InvertedRange));
    }
}
