//! Connection pool construction.
//!
//! Two handles, two roles. [`Database`] connects as the application
//! role, which the RLS policies apply to. [`MaintenanceDatabase`]
//! connects as the bypass role and exists so that cross-store access
//! is always an explicit, greppable choice rather than a binder
//! misuse.

use crate::error::DbError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

/// Pool sizing and acquire behavior.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// How long a request may wait for a free connection before
    /// failing with `DbError::PoolExhausted`.
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// The application database handle (RLS-governed role).
///
/// All tenant-governed work must go through
/// [`crate::with_store_context`]; handing the raw pool to a query is
/// only correct for the non-RLS tables (`users`, `stores`).
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect as the application role.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ConnectionFailed` if the pool cannot be
    /// established.
    pub async fn connect(url: &str, config: &PoolConfig) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(url)
            .await
            .map_err(DbError::ConnectionFailed)?;

        info!(
            max_connections = config.max_connections,
            "Connected to database (application role)"
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by tests).
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub fn inner(&self) -> &PgPool {
        &self.pool
    }
}

/// The maintenance database handle — the explicit RLS bypass path.
///
/// Connects with the superuser/maintenance credential. Used only for
/// migrations, seeding and cross-store administration; never for
/// serving tenant requests, and never passed to the tenant context
/// binder.
#[derive(Clone)]
pub struct MaintenanceDatabase {
    pool: PgPool,
}

impl MaintenanceDatabase {
    /// Connect as the maintenance role.
    ///
    /// # Errors
    ///
    /// Returns `DbError::ConnectionFailed` if the pool cannot be
    /// established.
    pub async fn connect(url: &str, config: &PoolConfig) -> Result<Self, DbError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(url)
            .await
            .map_err(DbError::ConnectionFailed)?;

        info!(
            max_connections = config.max_connections,
            "Connected to database (maintenance role, RLS bypass)"
        );

        Ok(Self { pool })
    }

    /// Wrap an existing pool (used by tests).
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub fn inner(&self) -> &PgPool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_config() {
        let config = PoolConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
    }
}
