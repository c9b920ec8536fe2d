//! # Gatehouse API Server
//!
//! Entry point for the Gatehouse user-account service: loads
//! configuration, composes the in-memory account directory into the
//! application state, and serves the Axum router.
//!
//! ## Usage
//!
//! ```bash
//! GATEHOUSE_JWT_SECRET=$(openssl rand -hex 32) cargo run -p gatehouse-api
//! ```

use std::sync::Arc;

use gatehouse_api::{
    app::{build_router, AppState},
    config::Config,
};
use gatehouse_shared::directory::MemoryDirectory;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gatehouse_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Gatehouse API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    // Compose the account directory here; everything downstream receives
    // it through AppState.
    let directory = Arc::new(MemoryDirectory::new());
    let state = AppState::new(directory, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}
