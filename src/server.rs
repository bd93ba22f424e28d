//! Server startup and shutdown logic.
//!
//! This module contains the `run_server` function which handles:
//! - Store initialization (Postgres or in-memory)
//! - Migration running
//! - Application state creation
//! - Router creation
//! - Server binding and graceful shutdown

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::routes;
use crate::service::Shortener;
use crate::state;
use crate::store::{MemoryStore, PgStore, UrlStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Run the web server with the given configuration.
///
/// Initializes the store (Postgres unless `in_memory` is set), creates
/// the application state and router, and serves until a shutdown signal
/// arrives.
///
/// # Errors
///
/// This function will return an error if:
/// - `DATABASE_URL` is missing in Postgres mode
/// - Database connection or migration fails
/// - Server binding fails
/// - Server runtime error occurs
pub async fn run_server(
    config: Config,
    addr: String,
    should_migrate: bool,
    in_memory: bool,
) -> AppResult<()> {
    info!("Starting shrinkr server...");

    let store: Arc<dyn UrlStore> = if in_memory {
        info!("Using in-memory store (mappings are lost on shutdown)");
        Arc::new(MemoryStore::new())
    } else {
        let database_url = config
            .database
            .url
            .clone()
            .ok_or_else(|| AppError::MissingEnvVar("DATABASE_URL".to_string()))?;

        info!("Connecting to database...");
        let store = PgStore::new(
            &database_url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await?;

        if should_migrate {
            info!("Running database migrations...");
            store.run_migrations().await?;
            info!("Migrations completed successfully");
        }

        Arc::new(store)
    };

    let shortener = Shortener::new(store.clone(), config.url.short_code_max_attempts);

    let state = Arc::new(state::AppState {
        shortener,
        store,
        base_url: config.url.base_url.clone(),
    });

    let app = routes::create_router(state, config.cors.allowed_origins);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind to address {}: {}", addr, e)))?;

    info!("Server listening on {}", addr);
    info!("Base URL: {}", config.url.base_url);

    let shutdown_signal = create_shutdown_signal();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create a future that resolves when a shutdown signal is received.
///
/// On Unix-like systems, this listens for both Ctrl+C (SIGINT) and SIGTERM.
/// On other platforms, it only listens for Ctrl+C.
///
/// # Panics
///
/// Panics if signal handler installation fails. This is intentional because
/// signal handler failures are unrecoverable system-level errors that indicate
/// the OS cannot deliver shutdown signals, making graceful shutdown impossible.
async fn create_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    ctrl_c.await;
}
