//! Router assembly.

use crate::handlers::{health, list_customers, list_orders, login_handler};
use crate::middleware::{auth_middleware, JwtSecret};
use crate::services::AuthService;
use axum::routing::{get, post};
use axum::{middleware, Extension, Router};
use std::sync::Arc;
use storefront_db::Database;
use tower_http::trace::TraceLayer;

/// Build the application router.
///
/// `/health` and `/api/login` are public; everything under the
/// protected group requires a valid bearer token and runs with the
/// caller's [`storefront_auth::Identity`] in extensions.
pub fn build_router(db: Database, auth_service: Arc<AuthService>, jwt_secret: JwtSecret) -> Router {
    let protected = Router::new()
        .route("/api/customers", get(list_customers))
        .route("/api/orders", get(list_orders))
        .layer(middleware::from_fn(auth_middleware))
        .layer(Extension(jwt_secret));

    Router::new()
        .route("/health", get(health))
        .route("/api/login", post(login_handler))
        .merge(protected)
        .layer(Extension(db))
        .layer(Extension(auth_service))
        .layer(TraceLayer::new_for_http())
}
