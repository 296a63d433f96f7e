//! Customer model (tenant-governed, direct RLS predicate).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};
use uuid::Uuid;

/// A customer of a store.
///
/// Row visibility is enforced by the RLS policy on `customers`
/// (`store_id::text = current_setting('app.current_rls_user_id',
/// true)`), so the queries here carry no `WHERE store_id` clause.
/// They take `&mut PgConnection` rather than the pool: the only way
/// to obtain one is inside the tenant context binder's closure.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier for the customer.
    pub id: Uuid,

    /// The store this customer belongs to.
    pub store_id: Uuid,

    /// Customer first name.
    pub first_name: String,

    /// Customer last name.
    pub last_name: String,

    /// Customer email address.
    pub email: String,

    /// When the customer was created.
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// List the customers visible under the bound subject.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM customers
            ORDER BY last_name, first_name
            ",
        )
        .fetch_all(conn)
        .await
    }

    /// Find a customer by ID, subject to the bound subject's policy.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM customers
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    /// Insert a customer (seeding; maintenance pool only).
    pub async fn create(
        pool: &sqlx::PgPool,
        store_id: Uuid,
        first_name: &str,
        last_name: &str,
        email: &str,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO customers (id, store_id, first_name, last_name, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            ",
        )
        .bind(Uuid::new_v4())
        .bind(store_id)
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .fetch_one(pool)
        .await
    }
}
