//! Store lookup model (non-RLS table).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A retail store. Global lookup table; the name is returned by the
/// login response.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Store {
    /// Unique identifier for the store.
    pub id: Uuid,

    /// Store display name.
    pub name: String,

    /// When the store was created.
    pub created_at: DateTime<Utc>,
}

impl Store {
    /// Find a store by ID.
    pub async fn find_by_id(pool: &sqlx::PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM stores
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Insert a store (seeding; maintenance pool only).
    pub async fn create(pool: &sqlx::PgPool, name: &str) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO stores (id, name)
            VALUES ($1, $2)
            RETURNING *
            ",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(pool)
        .await
    }
}
