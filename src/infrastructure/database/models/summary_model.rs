use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Summary as DomainSummary;
use crate::infrastructure::database::schema::summaries;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = summaries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SummaryModel {
    pub id: Uuid,
    pub document_id: Uuid,
    pub title: String,
    pub content: String,
    pub key_points: Option<serde_json::Value>,
    pub action_items: Option<serde_json::Value>,
    pub tags: Option<serde_json::Value>,
    pub word_count: Option<i32>,
    pub processing_time: Option<i32>,
    pub ai_model: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset, Deserialize)]
#[diesel(table_name = summaries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewSummaryModel {
    pub id: Uuid,
    pub document_id: Uuid,
    pub title: String,
    pub content: String,
    pub key_points: Option<serde_json::Value>,
    pub action_items: Option<serde_json::Value>,
    pub tags: Option<serde_json::Value>,
    pub word_count: Option<i32>,
    pub processing_time: Option<i32>,
    pub ai_model: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn string_list_to_json(list: &[String]) -> serde_json::Value {
    serde_json::Value::Array(
        list.iter()
            .map(|s| serde_json::Value::String(s.clone()))
            .collect(),
    )
}

fn json_to_string_list(value: Option<serde_json::Value>) -> Result<Vec<String>, String> {
    match value {
        None => Ok(Vec::new()),
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => Ok(s),
                other => Err(format!("Expected string in list, got: {}", other)),
            })
            .collect(),
        Some(other) => Err(format!("Expected JSON array, got: {}", other)),
    }
}

impl From<&DomainSummary> for NewSummaryModel {
    fn from(summary: &DomainSummary) -> Self {
        Self {
            id: summary.id(),
            document_id: summary.document_id(),
            title: summary.title().to_string(),
            content: summary.content().to_string(),
            key_points: Some(string_list_to_json(summary.key_points())),
            action_items: Some(string_list_to_json(summary.action_items())),
            tags: Some(string_list_to_json(summary.tags())),
            word_count: Some(summary.word_count()),
            processing_time: Some(summary.processing_time()),
            ai_model: summary.ai_model().to_string(),
            created_at: summary.created_at(),
            updated_at: summary.updated_at(),
        }
    }
}

impl TryFrom<SummaryModel> for DomainSummary {
    type Error = String;

    fn try_from(model: SummaryModel) -> Result<Self, Self::Error> {
        Ok(DomainSummary::from_database(
            model.id,
            model.document_id,
            model.title,
            model.content,
            json_to_string_list(model.key_points)?,
            json_to_string_list(model.action_items)?,
            json_to_string_list(model.tags)?,
            model.word_count.unwrap_or(0),
            model.processing_time.unwrap_or(0),
            model.ai_model,
            model.created_at,
            model.updated_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_list_round_trip() {
        let list = vec!["one".to_string(), "two".to_string()];
        let json = string_list_to_json(&list);
        assert_eq!(json_to_string_list(Some(json)).unwrap(), list);
    }

    #[test]
    fn test_missing_list_reads_as_empty() {
        assert!(json_to_string_list(None).unwrap().is_empty());
    }

    #[test]
    fn test_non_array_json_rejected() {
        assert!(json_to_string_list(Some(serde_json::json!({"a": 1}))).is_err());
    }
}
