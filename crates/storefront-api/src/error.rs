//! API error type and HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use storefront_auth::AuthError;
use storefront_db::DbError;
use thiserror::Error;

/// Uniform body for failed logins. Identical for unknown-username and
/// wrong-password so the response never reveals which part failed.
pub const INVALID_CREDENTIALS_DETAIL: &str = "Invalid username or password";

/// Errors returned by API handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Login failed. Always rendered as the uniform 401 body.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Bearer token missing, malformed, expired or forged.
    #[error("unauthorized")]
    Unauthorized,

    /// Authenticated but not allowed here (admin tokens on tenant
    /// endpoints).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Request body failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Database layer error.
    #[error(transparent)]
    Database(#[from] DbError),

    /// Token/password machinery error.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Server-side invariant violation (corrupt role column, bad
    /// configuration). Never exposes detail to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            ApiError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS_DETAIL.to_string())
            }
            ApiError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Invalid or expired token".to_string())
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Database(DbError::PoolExhausted) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable".to_string(),
            ),
            ApiError::Database(err @ DbError::ContextBindFailed(_)) => {
                // Loud: a bind failure means we could not establish the
                // isolation context for this request.
                tracing::error!(error = %err, "tenant context bind failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Database(err) => {
                tracing::error!(error = %err, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Auth(err) if err.is_token_error() => {
                (StatusCode::UNAUTHORIZED, "Invalid or expired token".to_string())
            }
            ApiError::Auth(err) => {
                tracing::error!(error = %err, "auth error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
