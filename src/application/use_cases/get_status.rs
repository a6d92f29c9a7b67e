use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Document, Summary};
use crate::domain::repositories::{DocumentRepository, SummaryRepository, UserRepository};

#[derive(Debug)]
pub enum GetStatusError {
    DocumentNotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for GetStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetStatusError::DocumentNotFound(id) => write!(f, "Document not found: {}", id),
            GetStatusError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetStatusError {}

#[derive(Debug)]
pub struct GetStatusResponse {
    pub document: Document,
    pub summary: Option<Summary>,
}

/// Read-only status lookup backing the polling endpoint. Safe to call at
/// high frequency; a foreign-owned document is indistinguishable from a
/// missing one.
pub struct GetStatusUseCase {
    document_repository: Arc<dyn DocumentRepository>,
    summary_repository: Arc<dyn SummaryRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl GetStatusUseCase {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        summary_repository: Arc<dyn SummaryRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            document_repository,
            summary_repository,
            user_repository,
        }
    }

    pub async fn execute(
        &self,
        auth_id: &str,
        document_id: Uuid,
    ) -> Result<GetStatusResponse, GetStatusError> {
        let document = self
            .document_repository
            .find_by_id(document_id)
            .await
            .map_err(|e| GetStatusError::RepositoryError(e.to_string()))?
            .ok_or(GetStatusError::DocumentNotFound(document_id))?;

        let owner = self
            .user_repository
            .find_by_auth_id(auth_id)
            .await
            .map_err(|e| GetStatusError::RepositoryError(e.to_string()))?;
        match owner {
            Some(user) if user.id() == document.user_id() => {}
            _ => return Err(GetStatusError::DocumentNotFound(document_id)),
        }

        let summary = self
            .summary_repository
            .find_by_document_id(document_id)
            .await
            .map_err(|e| GetStatusError::RepositoryError(e.to_string()))?;

        Ok(GetStatusResponse { document, summary })
    }
}
