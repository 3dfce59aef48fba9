use std::sync::Arc;

use activities_frontend::config::FrontendConfig;
use activities_frontend::services::ActivitiesApi;
use activities_frontend::ui::{ActivityRenderer, PageHandles, RenderOutcome};
use activities_frontend::web::routes::page::IndexTemplate;
use askama::Template;
use dotenvy::dotenv;

// Runs one render cycle against the configured backend and prints the page HTML.
#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let config = FrontendConfig::from_env();
    let api = match ActivitiesApi::new(&config.activities_api_url) {
        Ok(api) => api,
        Err(e) => {
            eprintln!("render failed: {}", e);
            std::process::exit(1);
        }
    };

    let handles = PageHandles::mount();
    let renderer = ActivityRenderer::new(Arc::new(api), handles.clone());
    let outcome = renderer.render().await;

    match IndexTemplate::new(handles.snapshot().await).render() {
        Ok(html) => println!("{}", html),
        Err(e) => {
            eprintln!("template render failed: {}", e);
            std::process::exit(1);
        }
    }

    if outcome == RenderOutcome::Failed {
        eprintln!("activities could not be loaded from {}", config.activities_api_url);
        std::process::exit(2);
    }
}
