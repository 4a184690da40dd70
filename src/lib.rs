use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

pub mod aggregate;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod routes;
pub mod upstream;

use context::AppContext;

/// Serve the gateway on an already-bound listener. Connect info is wired in
/// so the correlation middleware can log the remote address.
pub async fn run_server(ctx: Arc<AppContext>, listener: TcpListener) -> Result<()> {
    let app = routes::create_router(ctx);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Failed to run server")
}
