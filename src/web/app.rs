use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, get_service, post},
    Router,
};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use super::middleware::visitor::{attach_visitor, VisitorPages};
use super::routes::page;
use crate::services::ActivitiesBackend;
use crate::ui::{ActivityRenderer, PageHandles};

/// Everything the browser routes need: the shared renderer plus the visitors'
/// own pages.
#[derive(Clone)]
pub struct AppState {
    pub renderer: ActivityRenderer,
    pub visitors: VisitorPages,
}

impl AppState {
    pub fn new(backend: Arc<dyn ActivitiesBackend>, message_hide_after: Duration) -> Self {
        let shared = PageHandles::mount();
        let renderer = ActivityRenderer::new(Arc::clone(&backend), shared.clone());
        let visitors = VisitorPages::new(shared, backend, renderer.clone(), message_hide_after);
        Self { renderer, visitors }
    }
}

pub fn build_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(page::index_handler))
        .route("/signup", post(page::signup_handler))
        .route("/unregister", post(page::unregister_handler))
        .route("/refresh", post(page::refresh_handler))
        .route_layer(middleware::from_fn_with_state(
            state.visitors.clone(),
            attach_visitor,
        ))
        .nest_service(
            "/static",
            get_service(ServeDir::new(static_dir.as_ref())),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
