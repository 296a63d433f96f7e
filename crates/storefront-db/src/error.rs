//! Error types for the storefront-db crate.

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Could not establish a database connection.
    #[error("database connection failed: {0}")]
    ConnectionFailed(#[source] sqlx::Error),

    /// The pool had no free connection within the acquire timeout.
    ///
    /// Surfaces as backpressure (HTTP 503) — never as an empty result
    /// set, which would be indistinguishable from RLS filtering.
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// Binding the RLS subject to a connection failed.
    ///
    /// The lease is discarded, not returned to the pool: a connection
    /// whose context state is unknown must never serve another
    /// request. Fatal for the current request; not retried.
    #[error("failed to bind tenant context: {0}")]
    ContextBindFailed(#[source] sqlx::Error),

    /// A migration failed to apply.
    #[error("migration failed: {0}")]
    MigrationFailed(#[source] sqlx::migrate::MigrateError),

    /// A query failed to execute.
    #[error("query failed: {0}")]
    QueryFailed(#[source] sqlx::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl DbError {
    /// Map a pool acquire error, distinguishing exhaustion from
    /// connection failures.
    #[must_use]
    pub fn from_acquire(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            other => DbError::ConnectionFailed(other),
        }
    }

    /// True if this error indicates pool exhaustion.
    #[must_use]
    pub fn is_pool_exhausted(&self) -> bool {
        matches!(self, DbError::PoolExhausted)
    }

    /// True if this error indicates a failed context bind.
    #[must_use]
    pub fn is_context_bind_failure(&self) -> bool {
        matches!(self, DbError::ContextBindFailed(_))
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound("row not found".to_string()),
            other => DbError::QueryFailed(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_maps_to_exhausted() {
        let err = DbError::from_acquire(sqlx::Error::PoolTimedOut);
        assert!(err.is_pool_exhausted());
    }

    #[test]
    fn other_acquire_errors_are_connection_failures() {
        let err = DbError::from_acquire(sqlx::Error::PoolClosed);
        assert!(matches!(err, DbError::ConnectionFailed(_)));
        assert!(!err.is_pool_exhausted());
    }

    #[test]
    fn display_messages() {
        assert_eq!(DbError::PoolExhausted.to_string(), "connection pool exhausted");
        assert!(DbError::NotFound("store".into()).to_string().contains("store"));
    }
}
