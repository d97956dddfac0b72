//! Application configuration loaded from environment variables.
//!
//! Fail-fast: required variables must be present and valid or startup
//! aborts with a clear message. In production mode, known insecure
//! defaults abort startup instead of merely warning.

use std::env;
use thiserror::Error;

/// Default SESSION_KEY: base64-encoded 32 zero bytes. Development only.
pub const INSECURE_SESSION_KEY: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=";

/// Application environment mode.
///
/// Development allows insecure defaults with warnings; production
/// refuses to start with them.
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

    /// Vanity domain of the upstream identity application,
    /// e.g. "auth.scorebridge.example".
    pub application_vanity_domain: String,

    /// Upstream application id, used for tenant discovery.
    pub application_id: String,

    /// PostgreSQL connection string for the document store.
    pub database_url: String,

    /// Base64-encoded 32-byte key sealing the session cookie.
    pub session_key: String,

    /// Base64-encoded 32-byte key for secret storage. Takes precedence
    /// over `master_secret` when both are set.
    pub encryption_key: Option<String>,

    /// Passphrase from which a secret-storage key is derived when no
    /// `encryption_key` is set. Neither set means secrets are disabled.
    pub master_secret: Option<String>,

    /// Upstream request timeout in seconds.
    pub upstream_timeout_secs: u64,

    /// Tracing filter directive (e.g. "info,scorebridge=debug").
    pub rust_log: String,

    /// Allowed CORS origins (comma-separated URLs, or "*" for development).
    pub cors_origins: Vec<String>,

    /// Server bind address.
    pub host: String,

    /// Server listen port.
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_env", &self.app_env)
            .field("application_vanity_domain", &self.application_vanity_domain)
            .field("application_id", &self.application_id)
            .field("database_url", &"[redacted]")
            .field("session_key", &"[redacted]")
            .field("encryption_key", &self.encryption_key.as_ref().map(|_| "[redacted]"))
            .field("master_secret", &self.master_secret.as_ref().map(|_| "[redacted]"))
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_origins", &self.cors_origins)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Required Variables
    ///
    /// - `APPLICATION_VANITY_DOMAIN` - upstream identity API domain
    /// - `APPLICATION_ID` - upstream application id
    /// - `DATABASE_URL` - PostgreSQL connection string
    ///
    /// # Optional Variables
    ///
    /// - `SESSION_KEY` - base64 32-byte cookie sealing key (insecure
    ///   default in development)
    /// - `ENCRYPTION_KEY` / `MASTER_SECRET` - secret storage key material
    /// - `UPSTREAM_TIMEOUT_SECS` - default: 30
    /// - `RUST_LOG` - default: "info"
    /// - `CORS_ORIGINS` - default: "*"
    /// - `HOST` - default: "0.0.0.0"
    /// - `PORT` - default: 8080
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development only)
        let _ = dotenvy::dotenv();

        let app_env = AppEnvironment::from_env_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let application_vanity_domain = env::var("APPLICATION_VANITY_DOMAIN")
            .map_err(|_| ConfigError::MissingVar("APPLICATION_VANITY_DOMAIN".to_string()))?;
        if application_vanity_domain.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "APPLICATION_VANITY_DOMAIN".to_string(),
                message: "Must not be empty".to_string(),
            });
        }

        let application_id = env::var("APPLICATION_ID")
            .map_err(|_| ConfigError::MissingVar("APPLICATION_ID".to_string()))?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let session_key =
            env::var("SESSION_KEY").unwrap_or_else(|_| INSECURE_SESSION_KEY.to_string());

        let encryption_key = env::var("ENCRYPTION_KEY").ok().filter(|s| !s.is_empty());
        let master_secret = env::var("MASTER_SECRET").ok().filter(|s| !s.is_empty());

        let upstream_timeout_secs = env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30)
            .max(1);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

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
            application_vanity_domain,
            application_id,
            database_url,
            session_key,
            encryption_key,
            master_secret,
            upstream_timeout_secs,
            rust_log,
            cors_origins,
            host,
            port,
        })
    }

    /// Get the server bind address as a socket address string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate security configuration based on the application environment.
    ///
    /// In production mode: returns `Err(errors)` listing all insecure
    /// defaults found. In development mode: returns `Ok(warnings)`.
    pub fn validate_security_config(&self) -> Result<Vec<String>, Vec<String>> {
        let mut issues = Vec::new();

        if self.session_key == INSECURE_SESSION_KEY {
            issues.push("SESSION_KEY is using the default insecure value".to_string());
        }

        if self.cors_origins.iter().any(|o| o == "*") {
            issues.push(
                "CORS_ORIGINS contains wildcard '*' which is not allowed in production".to_string(),
            );
        }

        if self.encryption_key.is_none() && self.master_secret.is_none() {
            issues.push(
                "Neither ENCRYPTION_KEY nor MASTER_SECRET is set; secret storage is disabled"
                    .to_string(),
            );
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
