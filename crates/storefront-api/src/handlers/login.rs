//! Login endpoint handler.
//!
//! POST /api/login - Authenticate a user and issue a session token.

use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse};
use crate::services::AuthService;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;
use validator::Validate;

/// Handle user login.
///
/// Validates the body, then delegates to [`AuthService::issue`]. Any
/// credential failure surfaces as the uniform 401 body.
pub async fn login_handler(
    Extension(auth_service): Extension<Arc<AuthService>>,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    request.validate().map_err(|e| {
        let errors: Vec<String> = e
            .field_errors()
            .values()
            .flat_map(|errors| {
                errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(std::string::ToString::to_string))
            })
            .collect();
        ApiError::Validation(errors.join(", "))
    })?;

    let response = auth_service
        .issue(&request.username, &request.password)
        .await?;

    Ok((StatusCode::OK, Json(response)))
}
