//! Request and response models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login name.
    #[validate(length(min = 1, max = 255, message = "Username is required"))]
    pub username: String,

    /// Plain-text password, verified against the stored Argon2id hash.
    #[validate(length(min = 1, max = 1024, message = "Password is required"))]
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// HS256-signed session token.
    pub access_token: String,

    /// The authenticated user's role (`manager` or `admin`).
    pub user_role: String,

    /// The user's store, absent for admins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<Uuid>,

    /// The store's display name, absent for admins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
}
