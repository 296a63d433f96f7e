//! The RLS subject — the value Row-Level Security policies compare
//! against to decide row visibility.

use crate::StoreId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque identifier bound to a database session for row filtering.
///
/// The database policies compare each row's owning store against the
/// currently bound subject. The subject is resolved from the
/// authenticated identity's store ID and is the *only* datum the
/// application ever passes into the database session — role and
/// username never cross that boundary.
///
/// The value is the owning store's UUID rendered as text, which is
/// what `set_config` / `current_setting` traffic in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RlsSubject(String);

impl RlsSubject {
    /// The textual value sent to `set_config`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<StoreId> for RlsSubject {
    fn from(store_id: StoreId) -> Self {
        Self(store_id.to_string())
    }
}

impl Display for RlsSubject {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
