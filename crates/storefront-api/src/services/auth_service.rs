//! Session token issuance.

use crate::error::ApiError;
use crate::models::LoginResponse;
use sqlx::PgPool;
use storefront_auth::{encode_token, verify_password_uniform, Claims};
use storefront_core::{Role, StoreId};
use storefront_db::models::{Store, User};
use storefront_db::DbError;

/// Authenticates credentials and mints session tokens.
///
/// Works entirely against the non-RLS tables (`users`, `stores`): at
/// login time there is no subject yet, so the plain application pool
/// is the right handle here.
pub struct AuthService {
    pool: PgPool,
    jwt_secret: Vec<u8>,
    token_ttl_secs: i64,
}

impl AuthService {
    /// Create the service.
    #[must_use]
    pub fn new(pool: PgPool, jwt_secret: impl Into<Vec<u8>>, token_ttl_secs: i64) -> Self {
        Self {
            pool,
            jwt_secret: jwt_secret.into(),
            token_ttl_secs,
        }
    }

    /// Authenticate and issue a token.
    ///
    /// Every failure path returns `ApiError::InvalidCredentials`; the
    /// unknown-username case still performs a hash verification (see
    /// [`verify_password_uniform`]) so response timing does not reveal
    /// whether the username exists.
    ///
    /// # Errors
    ///
    /// `ApiError::InvalidCredentials` on any credential mismatch;
    /// database and token errors propagate as their own variants.
    pub async fn issue(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let user = User::find_by_username(&self.pool, username)
            .await
            .map_err(DbError::from)?;

        let verified =
            verify_password_uniform(password, user.as_ref().map(|u| u.password_hash.as_str()));
        if !verified {
            tracing::debug!("login rejected");
            return Err(ApiError::InvalidCredentials);
        }

        // verified == true implies the user row exists.
        let user = user.ok_or(ApiError::InvalidCredentials)?;

        let role: Role = user
            .role
            .parse()
            .map_err(|e| ApiError::Internal(format!("corrupt role for user {}: {e}", user.id)))?;

        let store_id = user.store_id.map(StoreId::from_uuid);
        let claims = Claims::new(&user.username, store_id, role, self.token_ttl_secs);
        let access_token = encode_token(&claims, &self.jwt_secret)?;

        let store_name = match user.store_id {
            Some(id) => Store::find_by_id(&self.pool, id)
                .await
                .map_err(DbError::from)?
                .map(|s| s.name),
            None => None,
        };

        tracing::info!(username = %user.username, role = %role, "login succeeded");

        Ok(LoginResponse {
            access_token,
            user_role: role.to_string(),
            store_id: user.store_id,
            store_name,
        })
    }
}
