//! HTTP serving layer
//!
//! A small web front end over the training and prediction pipelines: a home
//! page with the churn form, a train trigger, and the predict submission.
//! Every outcome, success or failure, is rendered into the page with HTTP
//! 200; errors surface as page content rather than status codes.

mod handlers;
mod routes;
mod templates;

pub use routes::create_router;

use crate::config::AppConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

/// State shared across handlers: the immutable runtime configuration.
/// Requests are otherwise independent; nothing mutable is shared.
pub struct AppState {
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }
}

/// Start the server with the given configuration
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    std::fs::create_dir_all(&config.models_dir)?;

    if !std::path::Path::new(&config.static_dir).exists() {
        warn!(static_dir = %config.static_dir, "Static directory not found, assets will be unavailable");
    }

    let state = Arc::new(AppState::new(config.clone()));
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.app_host, config.app_port).parse()?;
    info!(
        host = %config.app_host,
        port = config.app_port,
        models_dir = %config.models_dir,
        "ChurnCast server starting"
    );
    info!(url = %format!("http://{addr}"), "Web UI available");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, pid = std::process::id(), "Server listening");

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Shutdown signal received, stopping server");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shut down cleanly");
    Ok(())
}
