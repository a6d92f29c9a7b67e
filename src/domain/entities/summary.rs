use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The structured AI output derived from exactly one document. `document_id`
/// is the canonical lookup key; word count and processing time are computed
/// at write time and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    id: Uuid,
    document_id: Uuid,
    title: String,
    content: String,
    key_points: Vec<String>,
    action_items: Vec<String>,
    tags: Vec<String>,
    word_count: i32,
    processing_time: i32,
    ai_model: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Summary {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        document_id: Uuid,
        title: String,
        content: String,
        key_points: Vec<String>,
        action_items: Vec<String>,
        tags: Vec<String>,
        word_count: i32,
        processing_time: i32,
        ai_model: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            document_id,
            title,
            content,
            key_points,
            action_items,
            tags,
            word_count,
            processing_time,
            ai_model,
            created_at: now,
            updated_at: now,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_database(
        id: Uuid,
        document_id: Uuid,
        title: String,
        content: String,
        key_points: Vec<String>,
        action_items: Vec<String>,
        tags: Vec<String>,
        word_count: i32,
        processing_time: i32,
        ai_model: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            document_id,
            title,
            content,
            key_points,
            action_items,
            tags,
            word_count,
            processing_time,
            ai_model,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn document_id(&self) -> Uuid {
        self.document_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn key_points(&self) -> &[String] {
        &self.key_points
    }

    pub fn action_items(&self) -> &[String] {
        &self.action_items
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn word_count(&self) -> i32 {
        self.word_count
    }

    pub fn processing_time(&self) -> i32 {
        self.processing_time
    }

    pub fn ai_model(&self) -> &str {
        &self.ai_model
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_creation() {
        let document_id = Uuid::new_v4();
        let summary = Summary::new(
            document_id,
            "Quarterly Report".to_string(),
            "Revenue grew in Q2.".to_string(),
            vec!["Revenue up 12%".to_string()],
            vec!["Review budget".to_string()],
            vec!["financial".to_string()],
            4,
            7,
            "google/gemma-3n-e4b-it".to_string(),
        );

        assert_eq!(summary.document_id(), document_id);
        assert_ne!(summary.id(), document_id);
        assert_eq!(summary.title(), "Quarterly Report");
        assert_eq!(summary.key_points().len(), 1);
        assert_eq!(summary.word_count(), 4);
        assert_eq!(summary.processing_time(), 7);
    }
}
