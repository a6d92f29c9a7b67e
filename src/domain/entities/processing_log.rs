use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{LogStatus, PipelineStage};

/// Append-only audit row recording one pipeline stage transition. Never
/// updated or deleted; rows for a document are ordered by creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingLog {
    id: Uuid,
    document_id: Uuid,
    stage: PipelineStage,
    status: LogStatus,
    message: Option<String>,
    metadata: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
}

impl ProcessingLog {
    pub fn new(
        document_id: Uuid,
        stage: PipelineStage,
        status: LogStatus,
        message: Option<String>,
        metadata: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            document_id,
            stage,
            status,
            message,
            metadata,
            created_at: Utc::now(),
        }
    }

    pub fn from_database(
        id: Uuid,
        document_id: Uuid,
        stage: PipelineStage,
        status: LogStatus,
        message: Option<String>,
        metadata: Option<serde_json::Value>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            document_id,
            stage,
            status,
            message,
            metadata,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document_id(&self) -> Uuid {
        self.document_id
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn status(&self) -> LogStatus {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_creation() {
        let document_id = Uuid::new_v4();
        let log = ProcessingLog::new(
            document_id,
            PipelineStage::Extraction,
            LogStatus::Started,
            Some("Starting PDF text extraction".to_string()),
            None,
        );

        assert_eq!(log.document_id(), document_id);
        assert_eq!(log.stage(), PipelineStage::Extraction);
        assert_eq!(log.status(), LogStatus::Started);
        assert!(log.metadata().is_none());
    }

    #[test]
    fn test_log_with_metadata() {
        let log = ProcessingLog::new(
            Uuid::new_v4(),
            PipelineStage::Analysis,
            LogStatus::Completed,
            None,
            Some(serde_json::json!({ "wordCount": 120 })),
        );

        assert_eq!(log.metadata().unwrap()["wordCount"], 120);
    }
}
