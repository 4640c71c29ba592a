// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::exchange_rate_service::ExchangeRateService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::xe_client::XeRateClient;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;
    if config.provider.authorization.is_none() {
        tracing::warn!("No provider authorization configured; upstream may reject requests");
    }

    // Create rate source (infrastructure layer)
    let source = Arc::new(XeRateClient::new(&config.provider)?);

    // Create services (application layer)
    let rate_service = ExchangeRateService::new(source);

    // Create application state
    let state = Arc::new(AppState { rate_service });

    // Build router (presentation layer)
    let router = build_router(state, config.server.static_dir.as_deref());

    // Start server
    let addr: SocketAddr = config.server.bind_addr.parse()?;
    tracing::info!(
        "Serving {}/{} rates on http://{}",
        config.provider.from_currency,
        config.provider.to_currency,
        addr
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
