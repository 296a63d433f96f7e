//! Application configuration loaded from environment variables.
//!
//! Fail-fast loading with validation: required variables must be
//! present and valid or the application exits with a clear error
//! message. In production mode the known insecure JWT secret default
//! refuses startup.

use std::env;
use thiserror::Error;

/// Development-only JWT secret. Allowed (with a warning) in
/// development mode; refused outright in production.
pub const INSECURE_JWT_SECRET: &str = "development-jwt-secret-change-in-production";

/// Application environment mode.
///
/// Controls security enforcement behavior:
/// - `Development`: the insecure default secret is allowed with a
///   WARN-level log.
/// - `Production`: the insecure default secret refuses startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    /// Parse from the `APP_ENV` environment variable value.
    /// Defaults to `Development` if unset or unrecognized.
    pub fn from_env_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            other => {
                tracing::warn!(
                    value = other,
                    "Unrecognized APP_ENV value, defaulting to Development"
                );
                Self::Development
            }
        }
    }

    /// Returns true if this is production mode.
    #[must_use]
    pub fn is_production(&self) -> bool {
        *self == Self::Production
    }
}

impl std::fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Configuration errors that can occur during environment loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Failed to parse port: {0}")]
    InvalidPort(#[from] std::num::ParseIntError),
}

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Application environment (development or production).
    pub app_env: AppEnvironment,

    /// PostgreSQL connection string for the application role. This
    /// role is subject to the RLS policies.
    pub database_url: String,

    /// PostgreSQL connection string for the maintenance role
    /// (BYPASSRLS). Optional; migrations and seeding are skipped at
    /// startup when unset.
    pub database_url_maintenance: Option<String>,

    /// HS256 secret for signing and verifying session tokens.
    pub jwt_secret: String,

    /// Session token lifetime in seconds.
    pub token_ttl_secs: i64,

    /// Tracing filter directive (e.g., "info,storefront=debug").
    pub rust_log: String,

    /// Server bind address.
    pub host: String,

    /// Server listen port.
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_env", &self.app_env)
            .field("database_url", &"[redacted]")
            .field("database_url_maintenance", &"[redacted]")
            .field("jwt_secret", &"[redacted]")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or
    /// values are invalid.
    ///
    /// # Required Variables
    ///
    /// - `DATABASE_URL` - PostgreSQL connection string (application role)
    ///
    /// # Optional Variables
    ///
    /// - `DATABASE_URL_MAINTENANCE` - maintenance role connection string
    /// - `JWT_SECRET` - token signing secret (insecure default in development)
    /// - `TOKEN_TTL_SECS` - token lifetime (default: 3600)
    /// - `RUST_LOG` - log filter (default: "info")
    /// - `HOST` - bind address (default: "0.0.0.0")
    /// - `PORT` - listen port (default: 8080)
    /// - `APP_ENV` - development (default) or production
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development only)
        let _ = dotenvy::dotenv();

        let app_env = AppEnvironment::from_env_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let database_url_maintenance = env::var("DATABASE_URL_MAINTENANCE")
            .ok()
            .filter(|s| !s.is_empty());

        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| INSECURE_JWT_SECRET.to_string());

        let token_ttl_secs: i64 = env::var("TOKEN_TTL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                var: "TOKEN_TTL_SECS".to_string(),
                message: "Must be a positive integer number of seconds".to_string(),
            })?;
        if token_ttl_secs <= 0 {
            return Err(ConfigError::InvalidValue {
                var: "TOKEN_TTL_SECS".to_string(),
                message: "Must be greater than zero".to_string(),
            });
        }

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;
        if port == 0 {
            return Err(ConfigError::InvalidValue {
                var: "PORT".to_string(),
                message: "Port must be between 1 and 65535".to_string(),
            });
        }

        Ok(Config {
            app_env,
            database_url,
            database_url_maintenance,
            jwt_secret,
            token_ttl_secs,
            rust_log,
            host,
            port,
        })
    }

    /// Get the server bind address as a socket address string.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate security configuration for the current environment.
    ///
    /// In **production** mode: returns `Err(errors)` listing insecure
    /// defaults found. In **development** mode: returns `Ok(warnings)`.
    pub fn validate_security_config(&self) -> Result<Vec<String>, Vec<String>> {
        let mut issues = Vec::new();

        if self.jwt_secret == INSECURE_JWT_SECRET {
            issues.push("JWT_SECRET is using the default insecure value".to_string());
        }

        if issues.is_empty() {
            return Ok(Vec::new());
        }

        if self.app_env.is_production() {
            Err(issues)
        } else {
            Ok(issues)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            app_env: AppEnvironment::Development,
            database_url: "postgres://localhost/test".to_string(),
            database_url_maintenance: None,
            jwt_secret: "a-real-secret".to_string(),
            token_ttl_secs: 3600,
            rust_log: "info".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }

    #[test]
    fn test_bind_addr() {
        assert_eq!(test_config().bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_app_environment_parsing() {
        assert_eq!(
            AppEnvironment::from_env_str("production"),
            AppEnvironment::Production
        );
        assert_eq!(
            AppEnvironment::from_env_str("prod"),
            AppEnvironment::Production
        );
        assert_eq!(
            AppEnvironment::from_env_str("dev"),
            AppEnvironment::Development
        );
        assert_eq!(
            AppEnvironment::from_env_str("staging"),
            AppEnvironment::Development
        );
    }

    #[test]
    fn test_production_rejects_insecure_jwt_secret() {
        let mut config = test_config();
        config.app_env = AppEnvironment::Production;
        config.jwt_secret = INSECURE_JWT_SECRET.to_string();

        let errors = config.validate_security_config().unwrap_err();
        assert!(errors.iter().any(|e| e.contains("JWT_SECRET")));
    }

    #[test]
    fn test_development_warns_on_insecure_jwt_secret() {
        let mut config = test_config();
        config.jwt_secret = INSECURE_JWT_SECRET.to_string();

        let warnings = config.validate_security_config().unwrap();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_secure_config_passes() {
        assert!(test_config().validate_security_config().unwrap().is_empty());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", test_config());
        assert!(!rendered.contains("a-real-secret"));
        assert!(!rendered.contains("postgres://"));
    }
}
