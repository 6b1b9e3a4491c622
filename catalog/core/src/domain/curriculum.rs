// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Curriculum entry ("plan de estudio")
//!
//! Assigns a subject to a program at a given semester with a credit value.
//! The (program, subject, semester) triple is unique; both references are
//! checked by `CurriculumService` before any write.

use serde::{Deserialize, Serialize};

use crate::domain::program::ProgramId;
use crate::domain::subject::SubjectId;

pub const DUPLICATE_CURRICULUM_MESSAGE: &str =
    "La asignatura ya está registrada en el plan de estudio del programa para ese semestre";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurriculumEntryId(pub i32);

impl std::fmt::Display for CurriculumEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumEntry {
    #[serde(rename = "idPlanEstudio")]
    pub id: CurriculumEntryId,

    #[serde(rename = "idPrograma")]
    pub program_id: ProgramId,

    #[serde(rename = "idAsignatura")]
    pub subject_id: SubjectId,

    /// Semester number within the program (1-based)
    #[serde(rename = "semestre")]
    pub semester: i32,

    #[serde(rename = "creditos")]
    pub credits: i32,
}

impl CurriculumEntry {
    pub fn key(&self) -> CurriculumKey {
        CurriculumKey {
            program_id: self.program_id,
            subject_id: self.subject_id,
            semester: self.semester,
        }
    }
}

/// Uniqueness key of a curriculum entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurriculumKey {
    pub program_id: ProgramId,
    pub subject_id: SubjectId,
    pub semester: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurriculumDraft {
    pub program_id: ProgramId,
    pub subject_id: SubjectId,
    pub semester: i32,
    pub credits: i32,
}

impl CurriculumDraft {
    pub fn key(&self) -> CurriculumKey {
        CurriculumKey {
            program_id: self.program_id,
            subject_id: self.subject_id,
            semester: self.semester,
        }
    }

    pub fn into_entry(self, id: CurriculumEntryId) -> CurriculumEntry {
        CurriculumEntry {
            id,
            program_id: self.program_id,
            subject_id: self.subject_id,
            semester: self.semester,
            credits: self.credits,
        }
    }
}

/// Curriculum entry joined with program and subject names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedCurriculumEntry {
    #[serde(rename = "idPlanEstudio")]
    pub id: CurriculumEntryId,

    #[serde(rename = "nombrePrograma")]
    pub program_name: String,

    #[serde(rename = "nombreAsignatura")]
    pub subject_name: String,

    #[serde(rename = "semestre")]
    pub semester: i32,

    #[serde(rename = "creditos")]
    pub credits: i32,
}
