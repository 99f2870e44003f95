//! Wallet Sentinel API Server
//!
//! REST API for wallet reputation and compromise analysis
//!
//! Usage:
//!   cargo run --bin wallet_api
//!
//! Environment:
//!   PORT / WALLET_PORT - Server port (default: 8080)
//!   WALLET_HOST        - Server host (default: 0.0.0.0)
//!   BASE_HTTP_URL      - Override of the Base mainnet RPC endpoint
//!   RUST_LOG           - Log level (default: info)

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use wallet_sentinel::api::{create_router, handlers::AppState, start_cleanup_task};
use wallet_sentinel::utils::constants::{APP_NAME, APP_VERSION};
use wallet_sentinel::{EngineConfig, ServerConfig, WalletEngine};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    info!("🛡️ {} v{}", APP_NAME, APP_VERSION);

    let engine_config = EngineConfig::from_env();
    let engine = WalletEngine::from_config(&engine_config)?;

    let state = Arc::new(AppState::new(engine));
    state.spawn_cache_cleanup();

    start_cleanup_task();
    info!("🧹 Background cleanup tasks started");

    let app = create_router(state.clone());

    let server_config = ServerConfig::from_env();
    let addr = server_config.socket_addr()?;

    info!("🚀 {} API starting on http://{}", APP_NAME, addr);
    info!("Endpoints:");
    info!("  GET /v1/reputation/:address  - Trust score, flags and badges");
    info!("  GET /v1/compromise/:address  - Compromise signals and recommendations");
    info!("  GET /v1/stats                - Cache statistics");
    info!("  GET /v1/health               - Health check");
    info!("  (append ?refresh=true to bypass the cache)");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    // peer addresses feed the per-client rate limit
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("🛑 Shutdown signal received");
    let reputation = state.engine.reputation.cache().stats();
    let compromise = state.engine.compromise.cache().stats();
    info!(
        "   Reputation cache: {} hits / {} misses",
        reputation.hits, reputation.misses
    );
    info!(
        "   Compromise cache: {} hits / {} misses",
        compromise.hits, compromise.misses
    );
    info!("👋 {} API shutdown complete", APP_NAME);

    Ok(())
}
