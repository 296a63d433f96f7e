//! Error types for authentication operations.

use thiserror::Error;

/// Authentication failures.
///
/// The API layer is responsible for collapsing these into uniform
/// HTTP responses; the variants here stay precise so logging and
/// tests can tell the cases apart.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Username/password combination is wrong. Deliberately carries
    /// no detail about *which* part was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Token signature does not verify against the server secret.
    #[error("invalid token signature")]
    InvalidSignature,

    /// Token expiry is in the past.
    #[error("token has expired")]
    Expired,

    /// Token is malformed or carries unusable claims.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Password hashing or hash parsing failed.
    #[error("password hashing failed: {0}")]
    HashingFailed(String),
}

impl AuthError {
    /// True for the token-validation failures that map to a generic
    /// "unauthenticated" response.
    #[must_use]
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidSignature | AuthError::Expired | AuthError::InvalidToken(_)
        )
    }
}
