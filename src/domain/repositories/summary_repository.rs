use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Summary;

#[derive(Debug)]
pub enum SummaryRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for SummaryRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryRepositoryError::NotFound(id) => write!(f, "Summary not found: {}", id),
            SummaryRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            SummaryRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for SummaryRepositoryError {}

#[async_trait]
pub trait SummaryRepository: Send + Sync {
    /// Insert, or replace the existing row for the same document. The
    /// `document_id` unique key makes re-processing safe to retry.
    async fn upsert(&self, summary: &Summary) -> Result<(), SummaryRepositoryError>;
    async fn find_by_document_id(
        &self,
        document_id: Uuid,
    ) -> Result<Option<Summary>, SummaryRepositoryError>;
    /// Lookup by the summary's own id or its document id, whichever matches.
    async fn find_by_id_or_document_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Summary>, SummaryRepositoryError>;
}
