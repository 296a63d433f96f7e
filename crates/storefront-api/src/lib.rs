//! # storefront-api
//!
//! HTTP surface for the storefront demo: the login endpoint, the
//! bearer-token identity middleware, and the tenant-scoped customer
//! and order endpoints. Handlers never filter by store themselves —
//! they resolve the caller's RLS subject and run their queries inside
//! `storefront_db::with_store_context`, letting the database's
//! Row-Level Security do the isolation.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;

pub use error::ApiError;
pub use router::build_router;
