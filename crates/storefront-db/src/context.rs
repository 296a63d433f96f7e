//! The tenant context binder.
//!
//! Binds an RLS subject to a pooled connection for exactly one unit
//! of work. The session variable is global mutable state from the
//! database's point of view; this module maps it to per-request scope
//! by treating it as a resource with scoped acquisition:
//!
//! ```text
//! acquire lease → BEGIN → set_config(subject, transaction-local)
//!     → caller's queries → COMMIT (or ROLLBACK)
//! ```
//!
//! Per lease the states are `Unbound → Bound(subject) → Released`,
//! and the API makes the illegal orderings unrepresentable: callers
//! never see the connection before the bind completes, and the bound
//! connection only exists inside the closure.
//!
//! Scoping is transaction-local (`set_config(..., true)`), which
//! PostgreSQL clears on COMMIT and ROLLBACK — including the implicit
//! rollback sqlx issues when a transaction guard is dropped on an
//! error or cancellation path. A connection therefore always re-enters
//! the pool with no subject bound. If the bind itself fails we cannot
//! make that guarantee, so the physical connection is detached from
//! the pool and closed instead of returned.

use crate::error::DbError;
use futures::future::BoxFuture;
use sqlx::{Connection, PgConnection, PgPool};
use storefront_core::RlsSubject;

/// Name of the session setting the RLS policies read.
///
/// Must match `current_setting('app.current_rls_user_id', true)` in
/// the policy definitions (see `migrations/`).
pub const RLS_SUBJECT_SETTING: &str = "app.current_rls_user_id";

/// Run `op` on a connection bound to `subject`.
///
/// Acquires a lease from the pool (bounded wait, `PoolExhausted` on
/// timeout), opens a transaction, binds the subject with
/// transaction-local scope, and hands the bound connection to `op`.
/// On success the transaction is committed; on error it is rolled
/// back. Either way the subject cannot outlive the transaction.
///
/// Administrative identities must not come through here — they have
/// no subject and are served by [`crate::MaintenanceDatabase`].
///
/// # Errors
///
/// - `DbError::PoolExhausted` — no free connection within the
///   acquire timeout.
/// - `DbError::ContextBindFailed` — the `set_config` call failed; the
///   lease has been discarded and the request must fail.
/// - Any error returned by `op` (transaction rolled back).
///
/// # Example
///
/// ```rust,ignore
/// let customers = with_store_context(db.inner(), &subject, |conn| {
///     Box::pin(async move { Customer::list(conn).await })
/// })
/// .await?;
/// ```
pub async fn with_store_context<T, F>(
    pool: &PgPool,
    subject: &RlsSubject,
    op: F,
) -> Result<T, DbError>
where
    F: for<'c> FnOnce(&'c mut PgConnection) -> BoxFuture<'c, Result<T, DbError>>,
{
    let mut conn = pool.acquire().await.map_err(DbError::from_acquire)?;

    let mut tx = conn.begin().await.map_err(DbError::QueryFailed)?;

    if let Err(err) = bind_subject(&mut *tx, subject).await {
        // The connection's context state is unknown; it must not be
        // reused. Drop the guard, then take the connection out of the
        // pool for good.
        drop(tx);
        tracing::error!(
            error = %err,
            "RLS subject bind failed; discarding connection lease"
        );
        let _ = conn.detach().close().await;
        return Err(DbError::ContextBindFailed(err));
    }

    tracing::debug!(subject = %subject, "RLS subject bound (transaction-local)");

    match op(&mut *tx).await {
        Ok(value) => {
            tx.commit().await.map_err(DbError::QueryFailed)?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "rollback after failed unit of work");
            }
            Err(err)
        }
    }
}

/// Issue the transaction-local `set_config` for the subject.
///
/// The third argument (`is_local = true`) scopes the setting to the
/// current transaction, so commit and rollback both clear it.
async fn bind_subject(conn: &mut PgConnection, subject: &RlsSubject) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT set_config($1, $2, true)")
        .bind(RLS_SUBJECT_SETTING)
        .bind(subject.as_str())
        .execute(conn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setting_name_matches_policy_definitions() {
        // The migrations hardcode this name in the policy predicates;
        // a rename must touch both places.
        assert_eq!(RLS_SUBJECT_SETTING, "app.current_rls_user_id");
    }

    // Behavior of the binder (isolation, reuse, discard-on-bind-failure)
    // is covered by the DB-backed tests in tests/store_isolation_test.rs.
}
