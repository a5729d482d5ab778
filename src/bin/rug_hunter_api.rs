//! Rug Hunter API Server
//!
//! REST API for mint authority resolution, classification and list maintenance
//!
//! Usage:
//!   cargo run --bin rug_hunter_api
//!
//! Environment:
//!   PORT / RUG_HUNTER_PORT - Server port (default: 8080)
//!   RUG_HUNTER_HOST        - Server host (default: 0.0.0.0)
//!   RUG_HUNTER_DATA_DIR    - List directory (default: ./data)
//!   SOLANA_RPC_ENDPOINT    - Ledger JSON-RPC URL
//!   RUST_LOG               - Log filter (default: info)

use rug_hunter::api::{create_router, start_cleanup_task, AppState};
use rug_hunter::utils::constants::{APP_NAME, APP_VERSION};
use rug_hunter::AppConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env();
    let state = Arc::new(AppState::from_config(&config)?);

    // Background cleanup for the rate limiter
    let cleanup = start_cleanup_task(state.rate_limiter.clone());
    info!("🧹 Background cleanup task started");

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🚀 {} API v{} starting on http://{}", APP_NAME, APP_VERSION, addr);
    info!("Endpoints:");
    info!("  GET  /v1/authority?mintAddress=  - Resolve mint authority");
    info!("  POST /v1/classify                - Classify a mint's authority");
    info!("  GET  /v1/lists/:list             - List snapshot");
    info!("  GET  /v1/lists/:list/:address    - Membership check");
    info!("  POST /v1/lists/:list             - Add/remove an address");
    info!("  GET  /v1/health                  - Health check");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("❌ Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    cleanup.abort();
    info!("👋 {} API shutdown complete", APP_NAME);

    Ok(())
}
