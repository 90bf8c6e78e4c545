// src/main.rs
use dotenv::dotenv;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use auto_validation::app::{build_router, build_state};
use auto_validation::common::config::{apply_cli_override, ServerConfig};

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // CONFIGURATION
    // ========================================================================

    let config = apply_cli_override(ServerConfig::from_env());
    info!(
        port = config.port,
        cors_origins = ?config.cors_origins,
        log_bodies = config.log_bodies,
        "Configuration loaded"
    );

    // ========================================================================
    // VALIDATOR REGISTRATION
    // ========================================================================

    let port = config.port;
    let state = build_state(config)?;

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
