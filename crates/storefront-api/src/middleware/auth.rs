//! Request identity extraction.
//!
//! Validates the bearer token and inserts the caller's [`Identity`]
//! into request extensions. Pure and side-effect-free: the same token
//! in the same validity window always yields the same identity.

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use storefront_auth::{decode_token, Identity};

use crate::error::ApiError;

/// Wrapper for the JWT signing secret so it can live in extensions.
#[derive(Clone)]
pub struct JwtSecret(pub String);

/// Bearer-token authentication middleware.
///
/// 1. Extracts the token from the `Authorization` header
/// 2. Decodes and validates it against the server secret
/// 3. Inserts [`storefront_auth::Claims`] and [`Identity`] into
///    request extensions
///
/// All token failures (missing, malformed, expired, forged) collapse
/// into a generic 401.
///
/// # Usage
///
/// ```rust,ignore
/// let router = Router::new()
///     .route("/api/customers", get(list_customers))
///     .layer(middleware::from_fn(auth_middleware))
///     .layer(Extension(JwtSecret(secret)));
/// ```
pub async fn auth_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let secret = request
        .extensions()
        .get::<JwtSecret>()
        .ok_or_else(|| {
            tracing::error!("JWT secret not configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server configuration error",
            )
                .into_response()
        })?
        .0
        .clone();

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized.into_response())?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized.into_response())?;

    if token.is_empty() {
        return Err(ApiError::Unauthorized.into_response());
    }

    let claims = decode_token(token, secret.as_bytes()).map_err(|e| {
        tracing::debug!(error = %e, "token validation failed");
        ApiError::Unauthorized.into_response()
    })?;

    let identity: Identity = claims.identity();

    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwt_secret_wrapper() {
        let secret = JwtSecret("test-secret".to_string());
        assert_eq!(secret.0, "test-secret");
    }
}
