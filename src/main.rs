//! MediaList server binary.
//!
//! Loads configuration, initializes logging, wires the dependency graph
//! and serves the HTTP API until a shutdown signal arrives.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use medialist_api::router::build_router;
use medialist_api::state::AppState;
use medialist_cache::CacheManager;
use medialist_core::config::AppConfig;
use medialist_core::error::AppError;
use medialist_database::connection::create_pool;
use medialist_database::migration::run_migrations;
use medialist_database::repositories::{ListRepository, UserRepository};
use medialist_database::{ListStore, UserStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("MEDIALIST_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber from logging configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set.
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .init();
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    info!("Starting MediaList server...");

    let pool = create_pool(&config.database).await?;
    run_migrations(&pool).await?;

    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    let users: Arc<dyn UserStore> = Arc::new(UserRepository::new(pool.clone()));
    let lists: Arc<dyn ListStore> = Arc::new(ListRepository::new(pool));

    let config = Arc::new(config);
    let state = AppState::build(config.clone(), cache, users, lists);
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::configuration(format!("Failed to bind to {addr}: {e}")))?;

    info!("MediaList server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .unwrap_or_else(|e| error!("Failed to install Ctrl+C handler: {e}"));
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => error!("Failed to install SIGTERM handler: {e}"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
