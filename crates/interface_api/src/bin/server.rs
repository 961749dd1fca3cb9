//! Person Registry - API Server Binary
//!
//! This binary starts the HTTP API server for the person registry.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin registry-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8080 DATABASE_URL=postgres://... cargo run --bin registry-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_BASE_PATH` - Route prefix (default: /api/v1)
//! * `API_DATABASE_URL` / `DATABASE_URL` - PostgreSQL connection string
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_person::{AddressService, PersonService};
use infra_db::{create_pool_from_url, run_migrations, PostgresRegistryAdapter};
use interface_api::{config::ApiConfig, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();

    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Person Registry API Server"
    );

    let pool = create_pool_from_url(&config.database_url)
        .await
        .context("connecting to database")?;

    run_migrations(&pool)
        .await
        .context("applying database migrations")?;

    // Wire the domain services to the database adapter
    let adapter = Arc::new(PostgresRegistryAdapter::new(pool));
    let people = Arc::new(PersonService::new(adapter.clone()));
    let addresses = Arc::new(AddressService::new(people.clone(), adapter));

    let app = create_router(AppState::new(people, addresses, config.clone()));

    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .context("parsing server address")?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await.context("binding listener")?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving")?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to individual env vars and then defaults when the prefixed
/// form is incomplete.
fn load_config() -> ApiConfig {
    ApiConfig::from_env().unwrap_or_else(|_| {
        let defaults = ApiConfig::default();
        ApiConfig {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            base_path: std::env::var("API_BASE_PATH").unwrap_or(defaults.base_path),
            database_url: std::env::var("DATABASE_URL")
                .or_else(|_| std::env::var("API_DATABASE_URL"))
                .unwrap_or(defaults.database_url),
            log_level: std::env::var("API_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or(defaults.log_level),
        }
    })
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
