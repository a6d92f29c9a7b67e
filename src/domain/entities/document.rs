use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::DocumentStatus;

/// One uploaded file and its processing state. Immutable once uploaded
/// except for the status machine driven by the processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: Uuid,
    user_id: Uuid,
    file_name: String,
    file_url: String,
    file_size: i64,
    storage_key: String,
    status: DocumentStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Document {
    pub fn new(
        user_id: Uuid,
        file_name: String,
        file_url: String,
        file_size: i64,
        storage_key: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            file_name,
            file_url,
            file_size,
            storage_key,
            status: DocumentStatus::Uploaded,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstruct a Document from persisted values.
    #[allow(clippy::too_many_arguments)]
    pub fn from_database(
        id: Uuid,
        user_id: Uuid,
        file_name: String,
        file_url: String,
        file_size: i64,
        storage_key: String,
        status: DocumentStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            file_name,
            file_url,
            file_size,
            storage_key,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_url(&self) -> &str {
        &self.file_url
    }

    pub fn file_size(&self) -> i64 {
        self.file_size
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn status(&self) -> &DocumentStatus {
        &self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn start_processing(&mut self) -> Result<(), String> {
        self.transition_to(DocumentStatus::Processing)
    }

    pub fn complete_processing(&mut self) -> Result<(), String> {
        self.transition_to(DocumentStatus::Completed)
    }

    pub fn fail_processing(&mut self) -> Result<(), String> {
        self.transition_to(DocumentStatus::Error)
    }

    fn transition_to(&mut self, new_status: DocumentStatus) -> Result<(), String> {
        if !self.status.can_transition_to(&new_status) {
            return Err(format!(
                "Invalid status transition: {} -> {}",
                self.status, new_status
            ));
        }
        self.status = new_status;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn is_processable(&self) -> bool {
        self.status.is_uploaded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Document {
        Document::new(
            Uuid::new_v4(),
            "report.pdf".to_string(),
            "https://files.example/report.pdf".to_string(),
            512_000,
            "abc123".to_string(),
        )
    }

    #[test]
    fn test_document_creation() {
        let doc = sample_document();
        assert_eq!(doc.file_name(), "report.pdf");
        assert_eq!(doc.file_size(), 512_000);
        assert_eq!(doc.status(), &DocumentStatus::Uploaded);
        assert!(doc.is_processable());
    }

    #[test]
    fn test_successful_run_transitions() {
        let mut doc = sample_document();

        assert!(doc.start_processing().is_ok());
        assert_eq!(doc.status(), &DocumentStatus::Processing);
        assert!(!doc.is_processable());

        assert!(doc.complete_processing().is_ok());
        assert_eq!(doc.status(), &DocumentStatus::Completed);
    }

    #[test]
    fn test_failing_run_transitions() {
        let mut doc = sample_document();

        doc.start_processing().unwrap();
        assert!(doc.fail_processing().is_ok());
        assert_eq!(doc.status(), &DocumentStatus::Error);

        // No recovery from error
        assert!(doc.start_processing().is_err());
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let mut doc = sample_document();
        assert!(doc.complete_processing().is_err());
        assert!(doc.fail_processing().is_err());
    }
}
