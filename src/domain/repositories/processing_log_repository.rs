use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::ProcessingLog;

#[derive(Debug)]
pub enum ProcessingLogRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for ProcessingLogRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingLogRepositoryError::DatabaseError(msg) => {
                write!(f, "Database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ProcessingLogRepositoryError {}

/// Append-only store; there is deliberately no update or delete.
#[async_trait]
pub trait ProcessingLogRepository: Send + Sync {
    async fn append(&self, log: &ProcessingLog) -> Result<(), ProcessingLogRepositoryError>;
    async fn find_by_document_id(
        &self,
        document_id: Uuid,
    ) -> Result<Vec<ProcessingLog>, ProcessingLogRepositoryError>;
}
