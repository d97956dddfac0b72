//! Scorebridge gateway server.
//!
//! Wires the upstream identity client, the Postgres document store and
//! the session layer into one Axum service.

mod config;
mod logging;

use axum::http::HeaderValue;
use config::Config;
use scorebridge_api::{api_router, AppState, SessionSealer};
use scorebridge_docstore::PgDocStore;
use scorebridge_secrets::{EncryptionService, SecretStore};
use scorebridge_wristband::WristbandClient;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
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
        "Starting scorebridge server"
    );

    // Validate security configuration
    match config.validate_security_config() {
        Ok(warnings) => {
            for warning in &warnings {
                tracing::warn!(target: "security", "{}", warning);
            }
            if !warnings.is_empty() {
                tracing::warn!(
                    target: "security",
                    count = warnings.len(),
                    "Insecure default values detected (allowed in {} mode)",
                    config.app_env
                );
            }
        }
        Err(errors) => {
            for error in &errors {
                tracing::error!(target: "security", "{}", error);
            }
            eprintln!(
                "FATAL: {} insecure default(s) detected in production mode. \
                 Set proper keys or use APP_ENV=development.",
                errors.len()
            );
            std::process::exit(1);
        }
    }

    // Create database connection pool
    let pool = match PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            info!("Database connection established");
            pool
        }
        Err(e) => {
            eprintln!("Failed to connect to database: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = sqlx::migrate!().run(&pool).await {
        eprintln!("FATAL: Database migration failed: {e}");
        std::process::exit(1);
    }

    // Upstream identity client
    let wristband = match WristbandClient::new(
        &config.application_vanity_domain,
        Duration::from_secs(config.upstream_timeout_secs),
    ) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("FATAL: Failed to build upstream client: {e}");
            std::process::exit(1);
        }
    };

    // Session cookie sealing key
    let sealer = match EncryptionService::from_base64_key(&config.session_key) {
        Ok(encryption) => Arc::new(SessionSealer::new(encryption)),
        Err(e) => {
            eprintln!("FATAL: Invalid SESSION_KEY: {e}");
            std::process::exit(1);
        }
    };

    // Secret storage encryption: explicit key wins over derived key;
    // neither means the feature answers 503.
    let secret_encryption = if let Some(key) = &config.encryption_key {
        match EncryptionService::from_base64_key(key) {
            Ok(encryption) => Some(Arc::new(encryption)),
            Err(e) => {
                eprintln!("FATAL: Invalid ENCRYPTION_KEY: {e}");
                std::process::exit(1);
            }
        }
    } else if let Some(master_secret) = &config.master_secret {
        Some(Arc::new(EncryptionService::from_master_secret(
            master_secret,
        )))
    } else {
        tracing::warn!("No secret storage key configured; /api/secrets will answer 503");
        None
    };

    let documents: Arc<dyn scorebridge_docstore::DocumentStore> =
        Arc::new(PgDocStore::new(pool.clone()));

    let state = AppState {
        wristband: Arc::new(wristband),
        documents: documents.clone(),
        secrets: SecretStore::new(documents, secret_encryption),
        sealer,
        application_id: config.application_id.clone(),
    };

    let cors = build_cors_layer(&config.cors_origins);

    let app = api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

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

/// Build CORS layer from configured origins.
///
/// Explicit origins enable credentials so the session cookie travels;
/// the wildcard cannot, per the CORS spec.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let is_wildcard = origins.len() == 1 && origins[0] == "*";

    let mut layer = CorsLayer::new().max_age(Duration::from_secs(3600));

    if is_wildcard {
        layer = layer
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    } else {
        use axum::http::header::{ACCEPT, CONTENT_TYPE, COOKIE, ORIGIN};
        use axum::http::Method;

        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        layer = layer
            .allow_origin(allowed)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([ACCEPT, CONTENT_TYPE, COOKIE, ORIGIN])
            .allow_credentials(true);
    }

    layer
}

/// Graceful shutdown on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
