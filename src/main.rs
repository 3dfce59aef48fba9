use std::sync::Arc;

use activities_frontend::config::FrontendConfig;
use activities_frontend::services::ActivitiesApi;
use activities_frontend::web::{build_router, AppState};
use dotenvy::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = FrontendConfig::from_env();

    let api = match ActivitiesApi::new(&config.activities_api_url) {
        Ok(api) => api,
        Err(e) => {
            error!("Cannot use ACTIVITIES_API_URL: {}", e);
            std::process::exit(1);
        }
    };
    info!(backend = %api.base_url(), "activities frontend starting");

    let state = AppState::new(Arc::new(api), config.message_hide_after);

    // First paint, the way the page fills itself once it is loaded.
    let renderer = state.renderer.clone();
    tokio::spawn(async move {
        let outcome = renderer.render().await;
        info!(?outcome, "initial_render");
    });

    let app = build_router(state, &config.static_dir);

    let addr = match config.bind_addr() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Cannot parse HOST/PORT {}:{}: {}", config.host, config.port, e);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            let fallback = match config.fallback_bind_addr() {
                Ok(addr) => addr,
                Err(e) => {
                    error!("Cannot parse fallback address: {}", e);
                    std::process::exit(1);
                }
            };
            warn!("Could not bind {}: {}. Trying fallback {}", addr, e, fallback);
            match tokio::net::TcpListener::bind(fallback).await {
                Ok(l) => l,
                Err(e) => {
                    error!("Could not bind fallback {}: {}", fallback, e);
                    std::process::exit(1);
                }
            }
        }
    };

    match listener.local_addr() {
        Ok(bound) => info!("Activities page on http://{}", bound),
        Err(e) => warn!("Listening, but local address is unknown: {}", e),
    }

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}
