//! User credential model (non-RLS table).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An application user. Queried only at login; never mutated by
/// request handling.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: Uuid,

    /// Login name, unique across all stores.
    pub username: String,

    /// Argon2id password hash (PHC string).
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Role name (`manager` or `admin`).
    pub role: String,

    /// The store this user belongs to. `NULL` for admins, who have no
    /// store identity and never receive an RLS subject.
    pub store_id: Option<Uuid>,

    /// When the user was created.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Find a user by username.
    pub async fn find_by_username(
        pool: &sqlx::PgPool,
        username: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(pool)
        .await
    }

    /// Insert a user (seeding; maintenance pool only).
    pub async fn create(
        pool: &sqlx::PgPool,
        username: &str,
        password_hash: &str,
        role: &str,
        store_id: Option<Uuid>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO users (id, username, password_hash, role, store_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .bind(role)
        .bind(store_id)
        .fetch_one(pool)
        .await
    }
}
