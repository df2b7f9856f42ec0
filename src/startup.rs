//! Application startup and server initialization.
//!
//! This module handles the creation and configuration of the HTTP server,
//! including client storage, identity state and route setup.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ConfigV1;
use crate::identity::ReactiveAuthState;
use crate::routes;
use crate::state::AppState;
use crate::storage::create_storage;

/// Initializes and runs the application server.
///
/// Sets up client storage, the identity state and the HTTP server with
/// configured routes. Binds to the address specified in the configuration
/// and serves until the process is interrupted.
///
/// # Errors
///
/// Returns an error if storage is misconfigured, the server fails to bind to
/// the specified address, or it encounters a runtime error during execution.
pub async fn run(config: Arc<ConfigV1>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let storage = create_storage(&config.storage)?;
    let identity = Arc::new(ReactiveAuthState::default());
    let state = AppState::new(config.clone(), identity, storage);

    let app = routes::create_router(state);

    info!("Starting server on {}", config.bind_address);
    let listener = TcpListener::bind(&config.bind_address).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
