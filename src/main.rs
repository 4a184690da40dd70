// ============================================================================
// News Gateway
// ============================================================================
//
// Single entry point in front of the news, comment and moderation services.
// It handles:
// - Fan-out/join of concurrent upstream reads into one composite response
// - The moderate-then-persist pipeline for comment submission
// - Correlation id propagation and per-request logging
//
// ============================================================================

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use news_gateway::config::Config;
use news_gateway::context::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Arc::new(Config::from_env()?);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.rust_log.clone()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("=== News Gateway Starting ===");
    info!("Port: {}", config.port);
    info!("News service: {}", config.news_service_url);
    info!("Comments service: {}", config.comments_service_url);
    info!("Censor service: {}", config.censor_service_url);

    let ctx = AppContext::new(config.clone())?;

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port)
        .parse()
        .context("Failed to parse bind address")?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    info!("News Gateway listening on {}", addr);

    news_gateway::run_server(ctx, listener).await
}
