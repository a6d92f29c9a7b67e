use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
};

use crate::presentation::http::dto::{CODE_UNAUTHORIZED, ErrorResponse};

/// Caller identity: the opaque auth id carried as `Authorization: Bearer
/// <auth-id>`. Verifying the token against the auth provider happens
/// upstream; this server only needs the id to scope data access.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    pub auth_id: String,
}

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        let auth_id = header.strip_prefix("Bearer ").unwrap_or("").trim();

        if auth_id.is_empty() {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse::new(
                    CODE_UNAUTHORIZED,
                    "Missing or malformed Authorization header",
                )),
            ));
        }

        Ok(CallerIdentity {
            auth_id: auth_id.to_string(),
        })
    }
}
