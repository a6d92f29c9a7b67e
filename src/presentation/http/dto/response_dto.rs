use serde::Serialize;

pub const CODE_VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const CODE_UNAUTHORIZED: &str = "UNAUTHORIZED";
pub const CODE_NOT_FOUND: &str = "NOT_FOUND";
pub const CODE_INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Error envelope shared by every endpoint. Successful responses carry the
/// route's own payload shape instead.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ApiError,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ApiError {
                code: code.to_string(),
                message: message.into(),
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponseDto {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponseDto {
    pub message: String,
}
