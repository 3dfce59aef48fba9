use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use cookie::{Cookie, SameSite};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::services::ActivitiesBackend;
use crate::ui::{ActionHandler, ActivityRenderer, MessageBanner, PageHandles};

pub const VISITOR_COOKIE: &str = "activities_visitor";

/// Pages untouched for this long are dropped the next time a visitor arrives.
pub const VISITOR_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// One visitor's view of the page: shared list and select, own banner and form.
#[derive(Clone)]
pub struct VisitorPage {
    pub handles: PageHandles,
    pub actions: ActionHandler,
}

struct VisitorEntry {
    page: VisitorPage,
    last_seen: Instant,
}

/// Per-visitor pages keyed by the visitor cookie.
#[derive(Clone)]
pub struct VisitorPages {
    shared: PageHandles,
    backend: Arc<dyn ActivitiesBackend>,
    renderer: ActivityRenderer,
    hide_after: Duration,
    pages: Arc<Mutex<HashMap<String, VisitorEntry>>>,
}

impl VisitorPages {
    pub fn new(
        shared: PageHandles,
        backend: Arc<dyn ActivitiesBackend>,
        renderer: ActivityRenderer,
        hide_after: Duration,
    ) -> Self {
        Self {
            shared,
            backend,
            renderer,
            hide_after,
            pages: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Looks up the page of a returning visitor. Unknown or missing ids get a
    /// fresh page under a newly issued id, returned alongside it.
    pub async fn open(&self, visitor_id: Option<&str>) -> (VisitorPage, Option<String>) {
        let now = Instant::now();
        let mut pages = self.pages.lock().await;

        if let Some(id) = visitor_id {
            if let Some(entry) = pages.get_mut(id) {
                entry.last_seen = now;
                return (entry.page.clone(), None);
            }
        }

        let before = pages.len();
        pages.retain(|_, entry| now.duration_since(entry.last_seen) < VISITOR_IDLE_TIMEOUT);
        if pages.len() < before {
            debug!(dropped = before - pages.len(), "idle_visitor_pages_dropped");
        }

        let id = Uuid::new_v4().to_string();
        let page = self.new_page();
        pages.insert(
            id.clone(),
            VisitorEntry {
                page: page.clone(),
                last_seen: now,
            },
        );
        debug!(visitors = pages.len(), "visitor_page_opened");
        (page, Some(id))
    }

    pub async fn open_pages(&self) -> usize {
        self.pages.lock().await.len()
    }

    fn new_page(&self) -> VisitorPage {
        let handles = self.shared.for_visitor();
        let banner = MessageBanner::new(handles.banner.clone(), self.hide_after);
        let actions = ActionHandler::new(
            Arc::clone(&self.backend),
            self.renderer.clone(),
            handles.clone(),
            banner,
        );
        VisitorPage { handles, actions }
    }
}

fn visitor_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split(';')
                .map(str::trim)
                .find_map(|c| c.strip_prefix(VISITOR_COOKIE)?.strip_prefix('='))
        })
        .map(str::to_string)
}

/// Resolves the visitor's page into the request extensions and hands out a
/// cookie when the visitor is new.
pub async fn attach_visitor(
    State(visitors): State<VisitorPages>,
    mut request: Request,
    next: Next,
) -> Response {
    let presented = visitor_id(request.headers());
    let (page, issued) = visitors.open(presented.as_deref()).await;
    request.extensions_mut().insert(page);

    let mut response = next.run(request).await;

    if let Some(id) = issued {
        let mut visitor_cookie = Cookie::new(VISITOR_COOKIE, id);
        visitor_cookie.set_path("/");
        visitor_cookie.set_http_only(true);
        visitor_cookie.set_same_site(SameSite::Lax);
        match HeaderValue::from_str(&visitor_cookie.to_string()) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!("Visitor cookie not set: {}", e),
        }
    }

    response
}
