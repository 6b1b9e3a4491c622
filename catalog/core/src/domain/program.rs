// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Academic program ("programa académico")

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramId(pub i32);

impl std::fmt::Display for ProgramId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    #[serde(rename = "idPrograma")]
    pub id: ProgramId,

    #[serde(rename = "nombrePrograma")]
    pub name: String,

    /// Education level (catalog table owned elsewhere)
    #[serde(rename = "idNivel")]
    pub level_id: i32,

    #[serde(rename = "idModalidad")]
    pub modality_id: i32,

    #[serde(rename = "duracionMeses")]
    pub duration_months: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramDraft {
    pub name: String,
    pub level_id: i32,
    pub modality_id: i32,
    pub duration_months: i32,
}

impl ProgramDraft {
    pub fn into_program(self, id: ProgramId) -> Program {
        Program {
            id,
            name: self.name,
            level_id: self.level_id,
            modality_id: self.modality_id,
            duration_months: self.duration_months,
        }
    }
}
