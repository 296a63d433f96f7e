//! Embedded schema migrations.
//!
//! Run with the maintenance handle: migrations create roles-agnostic
//! schema plus the RLS policies, and the application role must not
//! own the tables it is policed on.

use crate::error::DbError;
use crate::pool::MaintenanceDatabase;
use tracing::info;

/// Apply all pending migrations.
///
/// # Errors
///
/// Returns `DbError::MigrationFailed` if any migration cannot be
/// applied.
pub async fn run_migrations(db: &MaintenanceDatabase) -> Result<(), DbError> {
    info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(db.inner())
        .await
        .map_err(DbError::MigrationFailed)?;

    info!("Database migrations complete");
    Ok(())
}
