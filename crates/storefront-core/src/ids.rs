//! Strongly typed identifiers.
//!
//! Newtype wrappers around [`Uuid`] that prevent accidental mixing of
//! ID kinds at compile time.
//!
//! # Example
//!
//! ```
//! use storefront_core::{StoreId, UserId};
//!
//! fn owning_store(id: StoreId) -> String {
//!     id.to_string()
//! }
//!
//! let store = StoreId::new();
//! let user = UserId::new();
//! owning_store(store);
//! // owning_store(user); // does not compile
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Error returned when an ID string is not a valid UUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// Which ID type failed to parse.
    pub id_type: &'static str,
    /// The underlying UUID parse error message.
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random ID (UUID v4).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self).map_err(|e| ParseIdError {
                    id_type: stringify!($name),
                    message: e.to_string(),
                })
            }
        }
    };
}

define_id!(
    /// Identifier of a retail store — the tenancy unit of the system.
    ///
    /// Every tenant-governed row is owned (directly or through a
    /// foreign key) by exactly one store.
    StoreId
);

define_id!(
    /// Identifier of an application user (store manager or admin).
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_distinct_ids() {
        assert_ne!(StoreId::new(), StoreId::new());
        assert_ne!(UserId::new(), UserId::new());
    }

    #[test]
    fn from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = StoreId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
    }

    #[test]
    fn display_is_uuid_string() {
        let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let id = StoreId::from_uuid(uuid);
        assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn parse_valid_uuid() {
        let id: StoreId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn parse_invalid_uuid_names_the_type() {
        let result: Result<UserId, _> = "not-a-uuid".parse();
        let err = result.unwrap_err();
        assert_eq!(err.id_type, "UserId");
        assert!(err.to_string().contains("UserId"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let id = StoreId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440000\"");
    }

    #[test]
    fn serde_roundtrip() {
        let original = UserId::new();
        let json = serde_json::to_string(&original).unwrap();
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }
}
