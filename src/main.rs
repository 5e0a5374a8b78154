//! uptime-grid - per-server uptime history as a time-bucketed grid.
//!
//! Pulls hourly availability from the monitoring backend and serves the
//! classified grid cells and labels as JSON.

mod config;
mod grid;
mod scheduler;
mod source;
mod web;

use config::ServerConfig;
use scheduler::{GridCache, Refresher};
use source::UptimeClient;
use web::Server;

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env()
            .add_directive("uptime_grid=info".parse()?))
        .init();

    // Load configuration
    let cfg = ServerConfig::load();
    tracing::info!("Starting uptime-grid on port {}...", cfg.http_port);
    tracing::info!("Using backend at {}", cfg.backend_url);
    tracing::info!("Reference timezone {}", cfg.zone().label());

    let client = Arc::new(UptimeClient::new(&cfg.backend_url, cfg.request_timeout())?);
    let refresher = Arc::new(Refresher::new(
        client,
        Arc::new(GridCache::new()),
        cfg.zone(),
        cfg.refresh_interval(),
    ));

    // Start background refresh
    refresher.start();

    // Start web server
    let server = Server::new(cfg, refresher.clone());
    let result = server.start().await;

    refresher.stop().await;
    result
}
