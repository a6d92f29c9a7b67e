use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::Summary;

/// Full summary payload for `GET /summary/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDto {
    pub id: Uuid,
    pub document_id: Uuid,
    pub title: String,
    pub content: String,
    pub key_points: Vec<String>,
    pub action_items: Vec<String>,
    pub tags: Vec<String>,
    pub word_count: i32,
    pub processing_time: i32,
    pub ai_model: String,
    pub created_at: String,
}

impl From<&Summary> for SummaryDto {
    fn from(summary: &Summary) -> Self {
        Self {
            id: summary.id(),
            document_id: summary.document_id(),
            title: summary.title().to_string(),
            content: summary.content().to_string(),
            key_points: summary.key_points().to_vec(),
            action_items: summary.action_items().to_vec(),
            tags: summary.tags().to_vec(),
            word_count: summary.word_count(),
            processing_time: summary.processing_time(),
            ai_model: summary.ai_model().to_string(),
            created_at: summary.created_at().to_rfc3339(),
        }
    }
}

/// Trimmed-down summary embedded in status polling responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPreviewDto {
    pub id: Uuid,
    pub document_id: Uuid,
    pub title: String,
    pub word_count: i32,
    pub created_at: String,
}

impl From<&Summary> for SummaryPreviewDto {
    fn from(summary: &Summary) -> Self {
        Self {
            id: summary.id(),
            document_id: summary.document_id(),
            title: summary.title().to_string(),
            word_count: summary.word_count(),
            created_at: summary.created_at().to_rfc3339(),
        }
    }
}
