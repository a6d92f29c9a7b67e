use axum::{
    Json,
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{
    GetStatusUseCase, ListDocumentsUseCase, UploadDocumentUseCase,
    get_status::GetStatusError,
    upload_document::{UploadDocumentError, UploadDocumentRequest},
};
use crate::presentation::http::auth::CallerIdentity;
use crate::presentation::http::dto::{
    CODE_INTERNAL_ERROR, CODE_NOT_FOUND, CODE_VALIDATION_ERROR, DocumentDetailDto,
    DocumentListResponseDto, DocumentStatusDto, ErrorResponse, StatusQueryDto, StatusResponseDto,
    SummaryPreviewDto, UploadResponseDto,
};

pub struct DocumentHandler {
    upload_use_case: Arc<UploadDocumentUseCase>,
    get_status_use_case: Arc<GetStatusUseCase>,
    list_documents_use_case: Arc<ListDocumentsUseCase>,
}

impl DocumentHandler {
    pub fn new(
        upload_use_case: Arc<UploadDocumentUseCase>,
        get_status_use_case: Arc<GetStatusUseCase>,
        list_documents_use_case: Arc<ListDocumentsUseCase>,
    ) -> Self {
        Self {
            upload_use_case,
            get_status_use_case,
            list_documents_use_case,
        }
    }

    pub async fn upload(
        State(handler): State<Arc<DocumentHandler>>,
        identity: CallerIdentity,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, StatusCode> {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?
        {
            if field.name() != Some("file") {
                continue;
            }

            let file_name = field
                .file_name()
                .ok_or(StatusCode::BAD_REQUEST)?
                .to_string();
            let content_type = field.content_type().map(|ct| ct.to_string());
            let data = field
                .bytes()
                .await
                .map_err(|_| StatusCode::BAD_REQUEST)?
                .to_vec();

            let request = UploadDocumentRequest {
                auth_id: identity.auth_id,
                file_name,
                content_type,
                file_data: data,
            };

            return match handler.upload_use_case.execute(request).await {
                Ok(response) => Ok((
                    StatusCode::CREATED,
                    Json(UploadResponseDto::from(response)),
                )
                    .into_response()),
                Err(UploadDocumentError::ValidationError(msg)) => Ok((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(CODE_VALIDATION_ERROR, msg)),
                )
                    .into_response()),
                Err(e) => Ok((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(CODE_INTERNAL_ERROR, e.to_string())),
                )
                    .into_response()),
            };
        }

        Ok((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                CODE_VALIDATION_ERROR,
                "No `file` field provided in the request",
            )),
        )
            .into_response())
    }

    pub async fn summary_status(
        State(handler): State<Arc<DocumentHandler>>,
        identity: CallerIdentity,
        Query(query): Query<StatusQueryDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let document_id = match query
            .document_id
            .as_deref()
            .map(Uuid::parse_str)
        {
            Some(Ok(id)) => id,
            _ => {
                return Ok((
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new(
                        CODE_VALIDATION_ERROR,
                        "Query parameter `documentId` must be a UUID",
                    )),
                )
                    .into_response());
            }
        };

        match handler
            .get_status_use_case
            .execute(&identity.auth_id, document_id)
            .await
        {
            Ok(response) => {
                let dto = StatusResponseDto {
                    document: DocumentStatusDto::from(&response.document),
                    summary: response.summary.as_ref().map(SummaryPreviewDto::from),
                    timestamp: chrono::Utc::now().to_rfc3339(),
                };
                Ok((StatusCode::OK, Json(dto)).into_response())
            }
            Err(GetStatusError::DocumentNotFound(id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    CODE_NOT_FOUND,
                    format!("Document not found: {}", id),
                )),
            )
                .into_response()),
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(CODE_INTERNAL_ERROR, e.to_string())),
            )
                .into_response()),
        }
    }

    pub async fn list_documents(
        State(handler): State<Arc<DocumentHandler>>,
        identity: CallerIdentity,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler
            .list_documents_use_case
            .execute(&identity.auth_id)
            .await
        {
            Ok(entries) => {
                let dto = DocumentListResponseDto {
                    documents: entries.iter().map(DocumentDetailDto::from).collect(),
                    timestamp: chrono::Utc::now().to_rfc3339(),
                };
                Ok((StatusCode::OK, Json(dto)).into_response())
            }
            Err(e) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(CODE_INTERNAL_ERROR, e.to_string())),
            )
                .into_response()),
        }
    }
}
