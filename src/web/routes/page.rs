use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use tokio::time::Instant;
use tracing::{error, info};

use crate::ui::page::{LOADING_LABEL, NO_PARTICIPANTS_LABEL};
use crate::ui::{PageSnapshot, SignupSubmission, UnregisterBinding};
use crate::web::app::AppState;
use crate::web::middleware::visitor::VisitorPage;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub page: PageSnapshot,
    pub no_participants_label: &'static str,
    pub loading_label: &'static str,
    /// Delay before the browser hides a visible message, matching the server-side timer.
    pub message_hide_in_ms: Option<u128>,
}

impl IndexTemplate {
    pub fn new(page: PageSnapshot) -> Self {
        let message_hide_in_ms = page.banner.hides_in(Instant::now()).map(|d| d.as_millis());
        Self {
            page,
            no_participants_label: NO_PARTICIPANTS_LABEL,
            loading_label: LOADING_LABEL,
            message_hide_in_ms,
        }
    }
}

pub async fn index_handler(Extension(visitor): Extension<VisitorPage>) -> Response {
    let template = IndexTemplate::new(visitor.handles.snapshot().await);
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!("Index template render failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn signup_handler(
    Extension(visitor): Extension<VisitorPage>,
    Form(form): Form<SignupSubmission>,
) -> Redirect {
    visitor
        .handles
        .form
        .lock()
        .await
        .fill(form.email, form.activity);
    let outcome = visitor.actions.submit_signup_form().await;
    info!(?outcome, "signup_submitted");
    Redirect::to("/")
}

pub async fn unregister_handler(
    Extension(visitor): Extension<VisitorPage>,
    Form(binding): Form<UnregisterBinding>,
) -> Redirect {
    let outcome = visitor.actions.unregister(binding).await;
    info!(?outcome, "unregister_clicked");
    Redirect::to("/")
}

pub async fn refresh_handler(State(state): State<AppState>) -> Redirect {
    let outcome = state.renderer.render().await;
    info!(?outcome, "refresh_requested");
    Redirect::to("/")
}
