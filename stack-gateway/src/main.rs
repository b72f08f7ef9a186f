//! Entry point for the `stack-gateway` HTTP server.

use std::sync::Arc;

use stack_gateway::{
    config::GatewayConfig,
    rate::RateLimiter,
    routes::{create_router, AppState},
};
use stack_store::{InMemoryGateway, OrderedStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    for (route, window) in config.rates.overrides() {
        info!(route, limit = window.limit, period_ms = window.period_ms(), "rate override");
    }

    let store = OrderedStore::with_gateway(config.store, InMemoryGateway::new());
    let limiter = RateLimiter::new(config.rates);
    let app = create_router(Arc::new(AppState::new(store, limiter)));

    let addr = config.listen_addr;
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, durable = config.store.durable, "stack-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
