use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::ProcessingLog as DomainLog;
use crate::domain::value_objects::{LogStatus, PipelineStage};
use crate::infrastructure::database::schema::processing_logs;

#[derive(Debug, Clone, Queryable, Selectable, Serialize, Identifiable)]
#[diesel(table_name = processing_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProcessingLogModel {
    pub id: Uuid,
    pub document_id: Uuid,
    pub stage: String,
    pub status: String,
    pub message: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, Deserialize)]
#[diesel(table_name = processing_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewProcessingLogModel {
    pub id: Uuid,
    pub document_id: Uuid,
    pub stage: String,
    pub status: String,
    pub message: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<&DomainLog> for NewProcessingLogModel {
    fn from(log: &DomainLog) -> Self {
        Self {
            id: log.id(),
            document_id: log.document_id(),
            stage: log.stage().as_str().to_string(),
            status: log.status().as_str().to_string(),
            message: log.message().map(|m| m.to_string()),
            metadata: log.metadata().cloned(),
            created_at: log.created_at(),
        }
    }
}

impl TryFrom<ProcessingLogModel> for DomainLog {
    type Error = String;

    fn try_from(model: ProcessingLogModel) -> Result<Self, Self::Error> {
        let stage = PipelineStage::from_str(&model.stage)?;
        let status = LogStatus::from_str(&model.status)?;

        Ok(DomainLog::from_database(
            model.id,
            model.document_id,
            stage,
            status,
            model.message,
            model.metadata,
            model.created_at,
        ))
    }
}
