//! Session token claims and the verified identity derived from them.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use storefront_core::{Role, RlsSubject, StoreId};
use uuid::Uuid;

/// JWT claims embedded in every session token.
///
/// Standard claims (`sub`, `iat`, `exp`, `jti`) plus the two custom
/// claims this system revolves around: the owning store (`sid`) and
/// the user role. Admin tokens carry no `sid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the username.
    pub sub: String,

    /// Store the user manages. Absent for administrative identities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<Uuid>,

    /// User role.
    pub role: Role,

    /// Issued-at (Unix timestamp).
    pub iat: i64,

    /// Expiration (Unix timestamp).
    pub exp: i64,

    /// Unique token ID.
    pub jti: String,
}

impl Claims {
    /// Build claims for a freshly issued token.
    ///
    /// `exp` is `now + ttl_secs`; `jti` is a random UUID so two tokens
    /// for the same user are still distinguishable.
    #[must_use]
    pub fn new(username: impl Into<String>, store_id: Option<StoreId>, role: Role, ttl_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: username.into(),
            sid: store_id.map(|id| *id.as_uuid()),
            role,
            iat: now,
            exp: now + ttl_secs,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// The store binding, if any.
    #[must_use]
    pub fn store_id(&self) -> Option<StoreId> {
        self.sid.map(StoreId::from_uuid)
    }

    /// Whether the expiry is in the past.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// The request-scoped identity these claims prove.
    #[must_use]
    pub fn identity(&self) -> Identity {
        Identity {
            store_id: self.store_id(),
            role: self.role,
        }
    }
}

/// Verified caller identity, recovered from a validated token.
///
/// This is what the HTTP middleware inserts into request extensions.
/// It is a pure value: extracting it twice from the same token within
/// the validity window yields identical results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    /// The store the caller manages; `None` for admin identities.
    pub store_id: Option<StoreId>,
    /// The caller's role.
    pub role: Role,
}

impl Identity {
    /// Resolve the RLS subject for this identity.
    ///
    /// Admin identities have no subject — they are served by the
    /// bypass path and must never reach the tenant context binder.
    #[must_use]
    pub fn rls_subject(&self) -> Option<RlsSubject> {
        if self.role.is_admin() {
            return None;
        }
        self.store_id.map(RlsSubject::from)
    }
}
