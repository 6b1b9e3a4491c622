// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Curriculum Use Cases
//!
//! Cross-validates a curriculum entry against programs and subjects before
//! every write. Checks run sequentially and stop at the first failure:
//!
//! 1. (update only) the entry exists
//! 2. the program exists
//! 3. the subject exists
//! 4. no other entry holds the same (program, subject, semester)

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::curriculum::{
    CurriculumDraft, CurriculumEntry, CurriculumEntryId, RelatedCurriculumEntry, DUPLICATE_CURRICULUM_MESSAGE,
};
use crate::domain::error::CatalogError;
use crate::domain::repository::{CurriculumRepository, ProgramRepository, SubjectRepository};

pub const CURRICULA_NOT_FOUND: &str = "No se encontró ningún plan de estudio";
pub const CURRICULUM_NOT_FOUND: &str = "No se encontró el plan de estudio buscado";
pub const CURRICULUM_PROGRAM_NOT_FOUND: &str = "No se encontró el programa académico";
pub const CURRICULUM_SUBJECT_NOT_FOUND: &str = "No se encontró la asignatura";

#[async_trait]
pub trait CurriculumService: Send + Sync {
    async fn list_entries(&self, limit: Option<i64>) -> Result<Vec<CurriculumEntry>, CatalogError>;

    async fn get_entry(&self, id: CurriculumEntryId) -> Result<CurriculumEntry, CatalogError>;

    async fn create_entry(&self, draft: CurriculumDraft) -> Result<RelatedCurriculumEntry, CatalogError>;

    async fn update_entry(
        &self,
        id: CurriculumEntryId,
        draft: CurriculumDraft,
    ) -> Result<RelatedCurriculumEntry, CatalogError>;

    async fn delete_entry(&self, id: CurriculumEntryId) -> Result<CurriculumEntry, CatalogError>;
}

pub struct StandardCurriculumService {
    curriculum: Arc<dyn CurriculumRepository>,
    programs: Arc<dyn ProgramRepository>,
    subjects: Arc<dyn SubjectRepository>,
}

impl StandardCurriculumService {
    pub fn new(
        curriculum: Arc<dyn CurriculumRepository>,
        programs: Arc<dyn ProgramRepository>,
        subjects: Arc<dyn SubjectRepository>,
    ) -> Self {
        Self {
            curriculum,
            programs,
            subjects,
        }
    }

    async fn validate(&self, draft: &CurriculumDraft, exclude: Option<CurriculumEntryId>) -> Result<(), CatalogError> {
        if self.programs.find_by_id(draft.program_id).await?.is_none() {
            return Err(CatalogError::not_found(CURRICULUM_PROGRAM_NOT_FOUND));
        }
        if self.subjects.find_by_id(draft.subject_id).await?.is_none() {
            return Err(CatalogError::not_found(CURRICULUM_SUBJECT_NOT_FOUND));
        }
        if self.curriculum.exists_duplicate(draft.key(), exclude).await? {
            warn!(
                program_id = %draft.program_id,
                subject_id = %draft.subject_id,
                semester = draft.semester,
                "Rejected duplicate curriculum entry"
            );
            return Err(CatalogError::business_rule(DUPLICATE_CURRICULUM_MESSAGE));
        }
        Ok(())
    }

    async fn related_view(&self, id: CurriculumEntryId) -> Result<RelatedCurriculumEntry, CatalogError> {
        self.curriculum.find_related(id).await?.ok_or_else(|| {
            error!(entry_id = %id, "Curriculum entry missing right after a successful write");
            CatalogError::internal(format!("No se pudo recuperar el plan de estudio {} después de guardarlo", id))
        })
    }
}

#[async_trait]
impl CurriculumService for StandardCurriculumService {
    async fn list_entries(&self, limit: Option<i64>) -> Result<Vec<CurriculumEntry>, CatalogError> {
        let entries = self.curriculum.list(limit).await?;
        if entries.is_empty() {
            return Err(CatalogError::not_found(CURRICULA_NOT_FOUND));
        }
        Ok(entries)
    }

    async fn get_entry(&self, id: CurriculumEntryId) -> Result<CurriculumEntry, CatalogError> {
        self.curriculum
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(CURRICULUM_NOT_FOUND))
    }

    async fn create_entry(&self, draft: CurriculumDraft) -> Result<RelatedCurriculumEntry, CatalogError> {
        self.validate(&draft, None).await?;

        let id = self.curriculum.create(&draft).await?;
        info!(entry_id = %id, program_id = %draft.program_id, subject_id = %draft.subject_id, "Curriculum entry created");

        self.related_view(id).await
    }

    async fn update_entry(
        &self,
        id: CurriculumEntryId,
        draft: CurriculumDraft,
    ) -> Result<RelatedCurriculumEntry, CatalogError> {
        if self.curriculum.find_by_id(id).await?.is_none() {
            return Err(CatalogError::not_found(CURRICULUM_NOT_FOUND));
        }
        self.validate(&draft, Some(id)).await?;

        self.curriculum
            .update(id, &draft)
            .await?
            .ok_or_else(|| CatalogError::not_found(CURRICULUM_NOT_FOUND))?;
        info!(entry_id = %id, "Curriculum entry updated");

        self.related_view(id).await
    }

    async fn delete_entry(&self, id: CurriculumEntryId) -> Result<CurriculumEntry, CatalogError> {
        let entry = self
            .curriculum
            .delete(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(CURRICULUM_NOT_FOUND))?;
        info!(entry_id = %id, "Curriculum entry deleted");
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::program::{ProgramDraft, ProgramId};
    use crate::domain::subject::{SubjectDraft, SubjectId};
    use crate::infrastructure::repositories::InMemoryCatalog;

    struct Fixture {
        service: StandardCurriculumService,
        program_id: ProgramId,
        subject_a: SubjectId,
        subject_b: SubjectId,
    }

    async fn fixture() -> Fixture {
        let catalog = InMemoryCatalog::new();
        let programs = catalog.program_repository();
        let subjects = catalog.subject_repository();

        let program_id = programs
            .create(&ProgramDraft {
                name: "Medicina".to_string(),
                level_id: 1,
                modality_id: 1,
                duration_months: 72,
            })
            .await
            .unwrap();
        let mut ids = Vec::new();
        for name in ["Anatomía", "Histología"] {
            ids.push(
                subjects
                    .create(&SubjectDraft {
                        name: name.to_string(),
                        load_hours: 96,
                        format_id: 1,
                        info: None,
                    })
                    .await
                    .unwrap(),
            );
        }

        Fixture {
            service: StandardCurriculumService::new(
                Arc::new(catalog.curriculum_repository()),
                Arc::new(programs),
                Arc::new(subjects),
            ),
            program_id,
            subject_a: ids[0],
            subject_b: ids[1],
        }
    }

    fn draft(program_id: ProgramId, subject_id: SubjectId, semester: i32) -> CurriculumDraft {
        CurriculumDraft {
            program_id,
            subject_id,
            semester,
            credits: 6,
        }
    }

    #[tokio::test]
    async fn test_create_returns_joined_names() {
        let f = fixture().await;
        let view = f.service.create_entry(draft(f.program_id, f.subject_a, 1)).await.unwrap();
        assert_eq!(view.program_name, "Medicina");
        assert_eq!(view.subject_name, "Anatomía");
        assert_eq!(view.credits, 6);
    }

    #[tokio::test]
    async fn test_missing_program_checked_before_subject() {
        let f = fixture().await;
        let err = f
            .service
            .create_entry(draft(ProgramId(99), SubjectId(99), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(ref m) if m.contains("programa académico")));

        let err = f
            .service
            .create_entry(draft(f.program_id, SubjectId(99), 1))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(ref m) if m.contains("asignatura")));
    }

    #[tokio::test]
    async fn test_duplicate_triple_is_a_business_rule_violation() {
        let f = fixture().await;
        f.service.create_entry(draft(f.program_id, f.subject_a, 2)).await.unwrap();
        let err = f
            .service
            .create_entry(draft(f.program_id, f.subject_a, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::BusinessRule(ref m) if m == DUPLICATE_CURRICULUM_MESSAGE));

        // Same subject in another semester is a different triple
        assert!(f.service.create_entry(draft(f.program_id, f.subject_a, 3)).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_to_own_triple_succeeds_but_collision_fails() {
        let f = fixture().await;
        let first = f.service.create_entry(draft(f.program_id, f.subject_a, 1)).await.unwrap();
        f.service.create_entry(draft(f.program_id, f.subject_b, 1)).await.unwrap();

        let mut unchanged = draft(f.program_id, f.subject_a, 1);
        unchanged.credits = 8;
        let view = f.service.update_entry(first.id, unchanged).await.unwrap();
        assert_eq!(view.credits, 8);

        let err = f
            .service
            .update_entry(first.id, draft(f.program_id, f.subject_b, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn test_update_missing_entry_is_checked_first() {
        let f = fixture().await;
        let err = f
            .service
            .update_entry(CurriculumEntryId(77), draft(ProgramId(99), f.subject_a, 1))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(ref m) if m == CURRICULUM_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_delete_and_empty_listing() {
        let f = fixture().await;
        assert!(matches!(f.service.list_entries(None).await, Err(CatalogError::NotFound(_))));
        let view = f.service.create_entry(draft(f.program_id, f.subject_a, 1)).await.unwrap();
        f.service.delete_entry(view.id).await.unwrap();
        assert!(matches!(f.service.delete_entry(view.id).await, Err(CatalogError::NotFound(_))));
    }
}
