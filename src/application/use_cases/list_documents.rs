use std::sync::Arc;

use crate::domain::entities::{Document, ProcessingLog, Summary};
use crate::domain::repositories::{
    DocumentRepository, ProcessingLogRepository, SummaryRepository, UserRepository,
};

#[derive(Debug)]
pub enum ListDocumentsError {
    RepositoryError(String),
}

impl std::fmt::Display for ListDocumentsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListDocumentsError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ListDocumentsError {}

#[derive(Debug)]
pub struct DocumentWithSummary {
    pub document: Document,
    pub summary: Option<Summary>,
    pub processing_logs: Vec<ProcessingLog>,
}

pub struct ListDocumentsUseCase {
    document_repository: Arc<dyn DocumentRepository>,
    summary_repository: Arc<dyn SummaryRepository>,
    log_repository: Arc<dyn ProcessingLogRepository>,
    user_repository: Arc<dyn UserRepository>,
}

impl ListDocumentsUseCase {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        summary_repository: Arc<dyn SummaryRepository>,
        log_repository: Arc<dyn ProcessingLogRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            document_repository,
            summary_repository,
            log_repository,
            user_repository,
        }
    }

    /// The caller's documents joined with any summary and processing logs,
    /// newest first. An unknown caller simply has no documents yet.
    pub async fn execute(
        &self,
        auth_id: &str,
    ) -> Result<Vec<DocumentWithSummary>, ListDocumentsError> {
        let user = match self
            .user_repository
            .find_by_auth_id(auth_id)
            .await
            .map_err(|e| ListDocumentsError::RepositoryError(e.to_string()))?
        {
            Some(user) => user,
            None => return Ok(Vec::new()),
        };

        let mut documents = self
            .document_repository
            .find_by_user_id(user.id())
            .await
            .map_err(|e| ListDocumentsError::RepositoryError(e.to_string()))?;
        documents.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        let joined = futures::future::join_all(documents.into_iter().map(|document| {
            let summary_repository = self.summary_repository.clone();
            let log_repository = self.log_repository.clone();
            async move {
                let summary = summary_repository
                    .find_by_document_id(document.id())
                    .await
                    .map_err(|e| ListDocumentsError::RepositoryError(e.to_string()))?;
                let processing_logs = log_repository
                    .find_by_document_id(document.id())
                    .await
                    .map_err(|e| ListDocumentsError::RepositoryError(e.to_string()))?;
                Ok(DocumentWithSummary {
                    document,
                    summary,
                    processing_logs,
                })
            }
        }))
        .await;

        joined.into_iter().collect()
    }
}
