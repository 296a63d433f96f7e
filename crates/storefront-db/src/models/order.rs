//! Order model (tenant-governed transitively, through the customer FK).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection};
use uuid::Uuid;

/// An order placed by a customer.
///
/// Orders carry no `store_id`; the RLS policy on `orders` joins
/// through `customers` to decide visibility, so these queries are
/// also clause-free and connection-scoped.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier for the order.
    pub id: Uuid,

    /// The customer who placed the order.
    pub customer_id: Uuid,

    /// Order total in cents.
    pub total_cents: i64,

    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// List the orders visible under the bound subject.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM orders
            ORDER BY placed_at DESC
            ",
        )
        .fetch_all(conn)
        .await
    }

    /// List the orders for one customer, subject to the bound
    /// subject's policy.
    pub async fn list_for_customer(
        conn: &mut PgConnection,
        customer_id: Uuid,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM orders
            WHERE customer_id = $1
            ORDER BY placed_at DESC
            ",
        )
        .bind(customer_id)
        .fetch_all(conn)
        .await
    }

    /// Insert an order (seeding; maintenance pool only).
    pub async fn create(
        pool: &sqlx::PgPool,
        customer_id: Uuid,
        total_cents: i64,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO orders (id, customer_id, total_cents)
            VALUES ($1, $2, $3)
            RETURNING *
            ",
        )
        .bind(Uuid::new_v4())
        .bind(customer_id)
        .bind(total_cents)
        .fetch_one(pool)
        .await
    }
}
