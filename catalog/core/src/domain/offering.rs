// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Offering ("oferta")
//!
//! A scheduled group of a subject within a program and academic period.
//! Invariants enforced by `OfferingService`:
//!
//! - (program, period, subject, group) is unique
//! - program, period and subject exist
//! - the period is `Active` when the offering is created or updated

use serde::{Deserialize, Serialize};

use crate::domain::period::PeriodId;
use crate::domain::program::ProgramId;
use crate::domain::subject::SubjectId;

pub const DUPLICATE_OFFERING_MESSAGE: &str =
    "Ya existe un grupo matriculado con la misma asignatura, programa y periodo académico";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferingId(pub i32);

impl std::fmt::Display for OfferingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offering {
    #[serde(rename = "idOferta")]
    pub id: OfferingId,

    #[serde(rename = "idPrograma")]
    pub program_id: ProgramId,

    #[serde(rename = "idPeriodo")]
    pub period_id: PeriodId,

    #[serde(rename = "idAsignatura")]
    pub subject_id: SubjectId,

    /// Group number
    #[serde(rename = "grupo")]
    pub group: i32,

    /// Enrollment capacity
    #[serde(rename = "cupo")]
    pub capacity: i32,
}

impl Offering {
    pub fn key(&self) -> OfferingKey {
        OfferingKey {
            program_id: self.program_id,
            period_id: self.period_id,
            subject_id: self.subject_id,
            group: self.group,
        }
    }
}

/// Uniqueness key of an offering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OfferingKey {
    pub program_id: ProgramId,
    pub period_id: PeriodId,
    pub subject_id: SubjectId,
    pub group: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferingDraft {
    pub program_id: ProgramId,
    pub period_id: PeriodId,
    pub subject_id: SubjectId,
    pub group: i32,
    pub capacity: i32,
}

impl OfferingDraft {
    pub fn key(&self) -> OfferingKey {
        OfferingKey {
            program_id: self.program_id,
            period_id: self.period_id,
            subject_id: self.subject_id,
            group: self.group,
        }
    }

    pub fn into_offering(self, id: OfferingId) -> Offering {
        Offering {
            id,
            program_id: self.program_id,
            period_id: self.period_id,
            subject_id: self.subject_id,
            group: self.group,
            capacity: self.capacity,
        }
    }
}

/// Offering joined with program, subject and period labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedOffering {
    #[serde(rename = "idOferta")]
    pub id: OfferingId,

    #[serde(rename = "nombrePrograma")]
    pub program_name: String,

    /// Semester label of the period
    #[serde(rename = "semestre")]
    pub semester: String,

    #[serde(rename = "nombreAsignatura")]
    pub subject_name: String,

    #[serde(rename = "informacion")]
    pub subject_info: Option<String>,

    #[serde(rename = "grupo")]
    pub group: i32,

    #[serde(rename = "cupo")]
    pub capacity: i32,
}
