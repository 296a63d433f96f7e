//! # storefront-core
//!
//! Core types shared by every crate in the storefront workspace:
//!
//! - Strongly typed identifiers ([`StoreId`], [`UserId`]) using the
//!   newtype pattern, so a user ID can never be passed where a store
//!   ID is expected.
//! - [`RlsSubject`], the opaque value compared by the database's
//!   Row-Level Security policies to decide row visibility.
//! - [`Role`], the two identity classes the system knows about.

mod ids;
mod role;
mod subject;

pub use ids::{ParseIdError, StoreId, UserId};
pub use role::Role;
pub use subject::RlsSubject;
