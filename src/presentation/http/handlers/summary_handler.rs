use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::{GetSummaryUseCase, get_summary::GetSummaryError};
use crate::presentation::http::auth::CallerIdentity;
use crate::presentation::http::dto::{
    CODE_INTERNAL_ERROR, CODE_NOT_FOUND, ErrorResponse, SummaryDto,
};

pub struct SummaryHandler {
    get_summary_use_case: Arc<GetSummaryUseCase>,
}

impl SummaryHandler {
    pub fn new(get_summary_use_case: Arc<GetSummaryUseCase>) -> Self {
        Self {
            get_summary_use_case,
        }
    }

    /// Accepts either a summary id or a document id in the path.
    pub async fn get_summary(
        State(handler): State<Arc<SummaryHandler>>,
        identity: CallerIdentity,
        Path(id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler
            .get_summary_use_case
            .execute(&identity.auth_id, id)
            .await
        {
            Ok(summary) => Ok((StatusCode::OK, Json(SummaryDto::from(&summary))).into_response()),
            Err(GetSummaryError::SummaryNotFound(id)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new(
                    CODE_NOT_FOUND,
                    format!("Summary not found: {}", id),
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
}
