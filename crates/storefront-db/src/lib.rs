//! # storefront-db
//!
//! Database layer for the storefront demo. The interesting part is
//! the **tenant context binder** in [`context`]: a scoped-execution
//! primitive that binds the caller's RLS subject to a pooled
//! connection for exactly one transaction, so PostgreSQL Row-Level
//! Security filters every query transparently and nothing leaks when
//! the connection is reused.
//!
//! Two connection handles exist, deliberately distinct:
//!
//! - [`Database`] — the application role. Subject to RLS; all
//!   tenant-governed work goes through
//!   [`context::with_store_context`].
//! - [`MaintenanceDatabase`] — the bypass role for seeding, schema
//!   administration and cross-store maintenance. It never touches
//!   the binder. Do not serve tenant requests with it.

pub mod context;
mod error;
mod migrations;
pub mod models;
mod pool;

pub use context::{with_store_context, RLS_SUBJECT_SETTING};
pub use error::DbError;
pub use migrations::run_migrations;
pub use pool::{Database, MaintenanceDatabase, PoolConfig};
