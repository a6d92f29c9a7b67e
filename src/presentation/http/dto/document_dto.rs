use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::list_documents::DocumentWithSummary;
use crate::application::use_cases::upload_document::UploadDocumentResponse;
use crate::domain::entities::{Document, ProcessingLog};
use crate::presentation::http::dto::summary_dto::{SummaryDto, SummaryPreviewDto};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponseDto {
    pub document_id: Uuid,
    pub file_url: String,
    pub file_name: String,
    pub file_size: i64,
}

impl From<UploadDocumentResponse> for UploadResponseDto {
    fn from(response: UploadDocumentResponse) -> Self {
        Self {
            document_id: response.document_id,
            file_url: response.file_url,
            file_name: response.file_name,
            file_size: response.file_size,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusQueryDto {
    pub document_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStatusDto {
    pub id: Uuid,
    pub status: String,
    pub file_name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Document> for DocumentStatusDto {
    fn from(document: &Document) -> Self {
        Self {
            id: document.id(),
            status: document.status().as_str().to_string(),
            file_name: document.file_name().to_string(),
            created_at: document.created_at().to_rfc3339(),
            updated_at: document.updated_at().to_rfc3339(),
        }
    }
}

/// Polling payload: the document's current status, the summary once one
/// exists, and the server-side timestamp of the observation.
#[derive(Debug, Serialize)]
pub struct StatusResponseDto {
    pub document: DocumentStatusDto,
    pub summary: Option<SummaryPreviewDto>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingLogDto {
    pub id: Uuid,
    pub stage: String,
    pub status: String,
    pub message: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: String,
}

impl From<&ProcessingLog> for ProcessingLogDto {
    fn from(log: &ProcessingLog) -> Self {
        Self {
            id: log.id(),
            stage: log.stage().as_str().to_string(),
            status: log.status().as_str().to_string(),
            message: log.message().map(str::to_string),
            metadata: log.metadata().cloned(),
            created_at: log.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDetailDto {
    pub id: Uuid,
    pub file_name: String,
    pub file_url: String,
    pub file_size: i64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    pub summary: Option<SummaryDto>,
    pub processing_logs: Vec<ProcessingLogDto>,
}

impl From<&DocumentWithSummary> for DocumentDetailDto {
    fn from(entry: &DocumentWithSummary) -> Self {
        Self {
            id: entry.document.id(),
            file_name: entry.document.file_name().to_string(),
            file_url: entry.document.file_url().to_string(),
            file_size: entry.document.file_size(),
            status: entry.document.status().as_str().to_string(),
            created_at: entry.document.created_at().to_rfc3339(),
            updated_at: entry.document.updated_at().to_rfc3339(),
            summary: entry.summary.as_ref().map(SummaryDto::from),
            processing_logs: entry
                .processing_logs
                .iter()
                .map(ProcessingLogDto::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponseDto {
    pub documents: Vec<DocumentDetailDto>,
    pub timestamp: String,
}
