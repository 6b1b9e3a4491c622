// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Program Use Cases

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::domain::error::CatalogError;
use crate::domain::program::{Program, ProgramDraft, ProgramId};
use crate::domain::repository::ProgramRepository;

pub const PROGRAM_NOT_FOUND: &str = "No se encontró ningún programa académico";

#[async_trait]
pub trait ProgramService: Send + Sync {
    async fn list_programs(&self, limit: Option<i64>) -> Result<Vec<Program>, CatalogError>;

    async fn get_program(&self, id: ProgramId) -> Result<Program, CatalogError>;

    async fn create_program(&self, draft: ProgramDraft) -> Result<ProgramId, CatalogError>;

    async fn update_program(&self, id: ProgramId, draft: ProgramDraft) -> Result<Program, CatalogError>;

    async fn delete_program(&self, id: ProgramId) -> Result<Program, CatalogError>;
}

pub struct StandardProgramService {
    repository: Arc<dyn ProgramRepository>,
}

impl StandardProgramService {
    pub fn new(repository: Arc<dyn ProgramRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ProgramService for StandardProgramService {
    async fn list_programs(&self, limit: Option<i64>) -> Result<Vec<Program>, CatalogError> {
        let programs = self.repository.list(limit).await?;
        if programs.is_empty() {
            return Err(CatalogError::not_found(PROGRAM_NOT_FOUND));
        }
        Ok(programs)
    }

    async fn get_program(&self, id: ProgramId) -> Result<Program, CatalogError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(PROGRAM_NOT_FOUND))
    }

    async fn create_program(&self, draft: ProgramDraft) -> Result<ProgramId, CatalogError> {
        let id = self.repository.create(&draft).await?;
        info!(program_id = %id, name = %draft.name, "Program created");
        Ok(id)
    }

    async fn update_program(&self, id: ProgramId, draft: ProgramDraft) -> Result<Program, CatalogError> {
        let program = self
            .repository
            .update(id, &draft)
            .await?
            .ok_or_else(|| CatalogError::not_found(format!("Programa académico con id {} no encontrado", id)))?;
        info!(program_id = %id, "Program updated");
        Ok(program)
    }

    async fn delete_program(&self, id: ProgramId) -> Result<Program, CatalogError> {
        let program = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(PROGRAM_NOT_FOUND))?;
        info!(program_id = %id, "Program deleted");
        Ok(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::InMemoryCatalog;

    fn draft() -> ProgramDraft {
        ProgramDraft {
            name: "Ingeniería de Sistemas".to_string(),
            level_id: 2,
            modality_id: 1,
            duration_months: 60,
        }
    }

    #[tokio::test]
    async fn test_program_crud() {
        let service = StandardProgramService::new(Arc::new(InMemoryCatalog::new().program_repository()));
        assert!(matches!(service.list_programs(None).await, Err(CatalogError::NotFound(_))));

        let id = service.create_program(draft()).await.unwrap();
        let mut changed = draft();
        changed.duration_months = 48;
        let updated = service.update_program(id, changed).await.unwrap();
        assert_eq!(updated.duration_months, 48);

        service.delete_program(id).await.unwrap();
        assert!(matches!(service.get_program(id).await, Err(CatalogError::NotFound(_))));
    }
}
