//! Liveness probe.

use axum::Json;
use serde_json::{json, Value};

/// GET /health — liveness probe, no auth, no database access.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
