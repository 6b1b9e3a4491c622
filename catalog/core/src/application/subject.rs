// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Subject Use Cases
//!
//! Plain CRUD over `SubjectRepository`. An empty listing is reported as
//! `NotFound`, like every other catalog collection.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::domain::error::CatalogError;
use crate::domain::repository::SubjectRepository;
use crate::domain::subject::{Subject, SubjectDraft, SubjectId};

pub const SUBJECT_NOT_FOUND: &str = "No se encontró ninguna asignatura";

#[async_trait]
pub trait SubjectService: Send + Sync {
    async fn list_subjects(&self, limit: Option<i64>) -> Result<Vec<Subject>, CatalogError>;

    async fn get_subject(&self, id: SubjectId) -> Result<Subject, CatalogError>;

    async fn create_subject(&self, draft: SubjectDraft) -> Result<SubjectId, CatalogError>;

    async fn update_subject(&self, id: SubjectId, draft: SubjectDraft) -> Result<Subject, CatalogError>;

    /// Returns the removed subject
    async fn delete_subject(&self, id: SubjectId) -> Result<Subject, CatalogError>;
}

pub struct StandardSubjectService {
    repository: Arc<dyn SubjectRepository>,
}

impl StandardSubjectService {
    pub fn new(repository: Arc<dyn SubjectRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl SubjectService for StandardSubjectService {
    async fn list_subjects(&self, limit: Option<i64>) -> Result<Vec<Subject>, CatalogError> {
        let subjects = self.repository.list(limit).await?;
        if subjects.is_empty() {
            return Err(CatalogError::not_found(SUBJECT_NOT_FOUND));
        }
        Ok(subjects)
    }

    async fn get_subject(&self, id: SubjectId) -> Result<Subject, CatalogError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(SUBJECT_NOT_FOUND))
    }

    async fn create_subject(&self, draft: SubjectDraft) -> Result<SubjectId, CatalogError> {
        let id = self.repository.create(&draft).await?;
        info!(subject_id = %id, name = %draft.name, "Subject created");
        Ok(id)
    }

    async fn update_subject(&self, id: SubjectId, draft: SubjectDraft) -> Result<Subject, CatalogError> {
        let subject = self
            .repository
            .update(id, &draft)
            .await?
            .ok_or_else(|| CatalogError::not_found(format!("Asignatura con id {} no encontrada", id)))?;
        info!(subject_id = %id, "Subject updated");
        Ok(subject)
    }

    async fn delete_subject(&self, id: SubjectId) -> Result<Subject, CatalogError> {
        let subject = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(SUBJECT_NOT_FOUND))?;
        info!(subject_id = %id, "Subject deleted");
        Ok(subject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repositories::InMemoryCatalog;

    fn service() -> StandardSubjectService {
        StandardSubjectService::new(Arc::new(InMemoryCatalog::new().subject_repository()))
    }

    fn draft(name: &str) -> SubjectDraft {
        SubjectDraft {
            name: name.to_string(),
            load_hours: 48,
            format_id: 2,
            info: None,
        }
    }

    #[tokio::test]
    async fn test_empty_listing_is_not_found() {
        let err = service().list_subjects(None).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(ref m) if m == SUBJECT_NOT_FOUND));
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = service();
        let id = service.create_subject(draft("Bioquímica")).await.unwrap();
        let subject = service.get_subject(id).await.unwrap();
        assert_eq!(subject.name, "Bioquímica");
        assert_eq!(service.list_subjects(Some(10)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_missing_subject_names_the_id() {
        let err = service().update_subject(SubjectId(42), draft("X")).await.unwrap_err();
        assert_eq!(err.to_string(), "Asignatura con id 42 no encontrada");
    }

    #[tokio::test]
    async fn test_delete_returns_removed_row_then_not_found() {
        let service = service();
        let id = service.create_subject(draft("Genética")).await.unwrap();
        assert_eq!(service.delete_subject(id).await.unwrap().id, id);
        assert!(matches!(service.delete_subject(id).await, Err(CatalogError::NotFound(_))));
    }
}
