//! Integration tests for store isolation through the tenant context
//! binder.
//!
//! These tests verify the binder's core guarantees:
//! - A bound subject sees exactly its own store's rows
//! - Connection reuse never leaks a previous subject
//! - The maintenance role bypasses RLS explicitly
//! - An unbound tenant-role query yields zero rows
//! - A failed unit of work rolls back
//!
//! Run with:
//! cargo test -p storefront-db --features integration --test store_isolation_test
//!
//! Prerequisites:
//! - PostgreSQL running with migrations applied
//! - TEST_DATABASE_URL (application role, no BYPASSRLS) and
//!   TEST_DATABASE_URL_MAINTENANCE (BYPASSRLS role) set

mod common;

#[cfg(feature = "integration")]
mod store_isolation {
    use super::common;
    use std::collections::HashSet;
    use storefront_core::{RlsSubject, StoreId};
    use storefront_db::models::{Customer, Order};
    use storefront_db::{with_store_context, DbError};
    use uuid::Uuid;

    fn subject_for(store_id: Uuid) -> RlsSubject {
        RlsSubject::from(StoreId::from_uuid(store_id))
    }

    async fn visible_customer_ids(
        pool: &sqlx::PgPool,
        store_id: Uuid,
    ) -> HashSet<Uuid> {
        let subject = subject_for(store_id);
        let customers = with_store_context(pool, &subject, |conn| {
            Box::pin(async move { Ok(Customer::list(conn).await?) })
        })
        .await
        .expect("customer query under bound subject");
        customers.into_iter().map(|c| c.id).collect()
    }

    /// Bound to one store's subject, a customer query returns exactly
    /// that store's three rows and none of the other store's.
    #[tokio::test]
    async fn customers_isolated_between_stores() {
        let maint = common::maintenance_pool().await;
        let app = common::app_pool(5).await;

        let id = common::unique_id();
        let seattle =
            common::seed_store_with_customers(&maint, &format!("Seattle-{id}")).await;
        let bellevue =
            common::seed_store_with_customers(&maint, &format!("Bellevue-{id}")).await;

        let visible = visible_customer_ids(&app, seattle.store_id).await;

        let expected: HashSet<Uuid> = seattle.customer_ids.iter().copied().collect();
        assert!(
            expected.is_subset(&visible),
            "all three Seattle customers should be visible"
        );
        for bellevue_id in &bellevue.customer_ids {
            assert!(
                !visible.contains(bellevue_id),
                "no Bellevue customer may be visible under Seattle's subject"
            );
        }
    }

    /// With a single physical connection, binding subject A and then
    /// subject B on the same connection must never leak A's rows into
    /// B's result.
    #[tokio::test]
    async fn no_leakage_across_connection_reuse() {
        let maint = common::maintenance_pool().await;
        // max_connections = 1 forces both units of work onto the same
        // physical connection.
        let app = common::app_pool(1).await;

        let id = common::unique_id();
        let store_a =
            common::seed_store_with_customers(&maint, &format!("Reuse-A-{id}")).await;
        let store_b =
            common::seed_store_with_customers(&maint, &format!("Reuse-B-{id}")).await;

        let seen_a = visible_customer_ids(&app, store_a.store_id).await;
        let seen_b = visible_customer_ids(&app, store_b.store_id).await;

        for a_id in &store_a.customer_ids {
            assert!(seen_a.contains(a_id));
            assert!(
                !seen_b.contains(a_id),
                "subject A's rows leaked into subject B's result on a reused connection"
            );
        }
        for b_id in &store_b.customer_ids {
            assert!(seen_b.contains(b_id));
            assert!(!seen_a.contains(b_id));
        }
    }

    /// The maintenance role, never bound, sees the union of both
    /// stores' rows.
    #[tokio::test]
    async fn maintenance_role_sees_union() {
        let maint = common::maintenance_pool().await;

        let id = common::unique_id();
        let store_a =
            common::seed_store_with_customers(&maint, &format!("Union-A-{id}")).await;
        let store_b =
            common::seed_store_with_customers(&maint, &format!("Union-B-{id}")).await;

        let rows: Vec<(Uuid,)> =
            sqlx::query_as("SELECT id FROM customers WHERE store_id = $1 OR store_id = $2")
                .bind(store_a.store_id)
                .bind(store_b.store_id)
                .fetch_all(&maint)
                .await
                .expect("maintenance query");
        let seen: HashSet<Uuid> = rows.into_iter().map(|(id,)| id).collect();

        for expected in store_a.customer_ids.iter().chain(&store_b.customer_ids) {
            assert!(
                seen.contains(expected),
                "maintenance role should see every store's rows"
            );
        }
    }

    /// A tenant-role query with no subject bound returns zero rows —
    /// RLS fails closed rather than erroring or leaking.
    #[tokio::test]
    async fn unbound_query_returns_zero_rows() {
        let maint = common::maintenance_pool().await;
        let app = common::app_pool(5).await;

        let id = common::unique_id();
        let store =
            common::seed_store_with_customers(&maint, &format!("Unbound-{id}")).await;

        // Deliberately bypass the binder: plain pool query, no subject.
        let rows: Vec<(Uuid,)> = sqlx::query_as("SELECT id FROM customers WHERE store_id = $1")
            .bind(store.store_id)
            .fetch_all(&app)
            .await
            .expect("unbound query should succeed, not error");
        assert!(
            rows.is_empty(),
            "unbound tenant-role access must yield zero rows"
        );
    }

    /// Orders are governed transitively through the customer FK.
    #[tokio::test]
    async fn orders_follow_customer_store() {
        let maint = common::maintenance_pool().await;
        let app = common::app_pool(5).await;

        let id = common::unique_id();
        let store_a =
            common::seed_store_with_customers(&maint, &format!("Orders-A-{id}")).await;
        let store_b =
            common::seed_store_with_customers(&maint, &format!("Orders-B-{id}")).await;

        let order_a = common::seed_order(&maint, store_a.customer_ids[0], 1250).await;
        let order_b = common::seed_order(&maint, store_b.customer_ids[0], 9900).await;

        let subject = subject_for(store_a.store_id);
        let orders = with_store_context(&app, &subject, |conn| {
            Box::pin(async move { Ok(Order::list(conn).await?) })
        })
        .await
        .expect("order query under bound subject");

        let seen: HashSet<Uuid> = orders.into_iter().map(|o| o.id).collect();
        assert!(seen.contains(&order_a), "own store's order visible");
        assert!(
            !seen.contains(&order_b),
            "other store's order must not be visible through the customer join"
        );
    }

    /// A closure error rolls the transaction back: writes inside the
    /// failed unit of work never become visible.
    #[tokio::test]
    async fn closure_error_rolls_back() {
        let maint = common::maintenance_pool().await;
        let app = common::app_pool(5).await;

        let id = common::unique_id();
        let store =
            common::seed_store_with_customers(&maint, &format!("Rollback-{id}")).await;

        let subject = subject_for(store.store_id);
        let doomed_id = Uuid::new_v4();
        let store_id = store.store_id;

        let result: Result<(), DbError> = with_store_context(&app, &subject, |conn| {
            Box::pin(async move {
                sqlx::query(
                    "INSERT INTO customers (id, store_id, first_name, last_name, email)
                     VALUES ($1, $2, 'Doomed', 'Row', 'doomed@test')",
                )
                .bind(doomed_id)
                .bind(store_id)
                .execute(conn)
                .await?;
                Err(DbError::NotFound("forced failure".into()))
            })
        })
        .await;
        assert!(result.is_err());

        let found: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM customers WHERE id = $1")
            .bind(doomed_id)
            .fetch_optional(&maint)
            .await
            .expect("maintenance lookup");
        assert!(
            found.is_none(),
            "insert inside a failed unit of work must be rolled back"
        );
    }
}
