//! Storefront demo API server.
//!
//! Wires the database pools, the auth service, and the router, then
//! serves with graceful shutdown. Two pools exist on purpose: the
//! application pool (RLS-governed) serves requests; the maintenance
//! pool (BYPASSRLS) only runs migrations at startup.

mod config;
mod logging;

use config::Config;
use std::net::SocketAddr;
use std::sync::Arc;
use storefront_api::middleware::JwtSecret;
use storefront_api::services::AuthService;
use storefront_db::{run_migrations, Database, MaintenanceDatabase, PoolConfig};
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() {
    // Load configuration (fail-fast on missing required values)
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        env = %config.app_env,
        "Starting store server"
    );

    match config.validate_security_config() {
        Ok(warnings) => {
            for warning in &warnings {
                tracing::warn!(target: "security", "{}", warning);
            }
        }
        Err(errors) => {
            for error in &errors {
                tracing::error!(target: "security", "{}", error);
            }
            eprintln!(
                "FATAL: insecure default(s) detected in production mode. \
                 Set a proper JWT_SECRET or use APP_ENV=development."
            );
            std::process::exit(1);
        }
    }

    let pool_config = PoolConfig::default();

    let db = match Database::connect(&config.database_url, &pool_config).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    // Migrations need the maintenance role; without it we assume the
    // schema is managed externally.
    if let Some(ref maintenance_url) = config.database_url_maintenance {
        let maintenance = match MaintenanceDatabase::connect(maintenance_url, &pool_config).await {
            Ok(db) => db,
            Err(e) => {
                tracing::error!("Failed to connect to database (maintenance role): {e}");
                std::process::exit(1);
            }
        };
        if let Err(e) = run_migrations(&maintenance).await {
            tracing::error!("Migrations failed: {e}");
            std::process::exit(1);
        }
    } else {
        info!("DATABASE_URL_MAINTENANCE not set, skipping migrations");
    }

    let auth_service = Arc::new(AuthService::new(
        db.inner().clone(),
        config.jwt_secret.as_bytes().to_vec(),
        config.token_ttl_secs,
    ));

    let app = storefront_api::build_router(db, auth_service, JwtSecret(config.jwt_secret.clone()));

    let addr: SocketAddr = match config.bind_addr().parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!("Invalid bind address '{}': {e}", config.bind_addr());
            std::process::exit(1);
        }
    };

    info!(%addr, "Server listening");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to address {addr}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {e}");
                // Fall through - we still want to wait for terminate signal
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
