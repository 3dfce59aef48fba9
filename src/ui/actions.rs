use std::sync::Arc;

use serde::Deserialize;
use tracing::{error, info, warn};

use super::banner::MessageBanner;
use super::cards::UnregisterBinding;
use super::page::{MessageKind, PageHandles};
use super::renderer::ActivityRenderer;
use crate::models::MessageBody;
use crate::services::{ActivitiesApiError, ActivitiesBackend};

pub const SIGNUP_REJECTED_FALLBACK: &str = "An error occurred";
pub const SIGNUP_FAILED_MESSAGE: &str = "Failed to sign up. Please try again.";
pub const UNREGISTER_REJECTED_FALLBACK: &str = "Failed to unregister";
pub const UNREGISTER_FAILED_MESSAGE: &str = "Failed to unregister. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignupSubmission {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub activity: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Succeeded,
    Rejected,
    Failed,
}

#[derive(Debug, Clone, Copy)]
enum ActionKind {
    Signup,
    Unregister,
}

impl ActionKind {
    fn as_str(self) -> &'static str {
        match self {
            ActionKind::Signup => "signup",
            ActionKind::Unregister => "unregister",
        }
    }

    fn rejected_fallback(self) -> &'static str {
        match self {
            ActionKind::Signup => SIGNUP_REJECTED_FALLBACK,
            ActionKind::Unregister => UNREGISTER_REJECTED_FALLBACK,
        }
    }

    fn failed_message(self) -> &'static str {
        match self {
            ActionKind::Signup => SIGNUP_FAILED_MESSAGE,
            ActionKind::Unregister => UNREGISTER_FAILED_MESSAGE,
        }
    }
}

/// Turns form submissions and unregister clicks into backend calls.
#[derive(Clone)]
pub struct ActionHandler {
    backend: Arc<dyn ActivitiesBackend>,
    renderer: ActivityRenderer,
    handles: PageHandles,
    banner: MessageBanner,
}

impl ActionHandler {
    pub fn new(
        backend: Arc<dyn ActivitiesBackend>,
        renderer: ActivityRenderer,
        handles: PageHandles,
        banner: MessageBanner,
    ) -> Self {
        Self {
            backend,
            renderer,
            handles,
            banner,
        }
    }

    /// Submits whatever the signup form currently holds.
    pub async fn submit_signup_form(&self) -> ActionOutcome {
        let form = self.handles.form.snapshot().await;
        self.signup(SignupSubmission {
            email: form.email,
            activity: form.activity,
        })
        .await
    }

    pub async fn signup(&self, submission: SignupSubmission) -> ActionOutcome {
        let result = self
            .backend
            .signup(&submission.activity, &submission.email)
            .await;
        self.finish(ActionKind::Signup, &submission.activity, result)
            .await
    }

    pub async fn unregister(&self, binding: UnregisterBinding) -> ActionOutcome {
        let result = self
            .backend
            .unregister(&binding.activity, &binding.email)
            .await;
        self.finish(ActionKind::Unregister, &binding.activity, result)
            .await
    }

    async fn finish(
        &self,
        kind: ActionKind,
        activity: &str,
        result: Result<MessageBody, ActivitiesApiError>,
    ) -> ActionOutcome {
        match result {
            Ok(body) => {
                info!(action = kind.as_str(), activity, "action_succeeded");
                self.banner.show(body.message, MessageKind::Success).await;
                if let ActionKind::Signup = kind {
                    self.handles.form.lock().await.reset();
                }
                self.renderer.render().await;
                ActionOutcome::Succeeded
            }
            Err(e @ ActivitiesApiError::Rejected { .. }) => {
                warn!(action = kind.as_str(), activity, error = %e, "action_rejected");
                let text = e.detail().unwrap_or(kind.rejected_fallback()).to_string();
                self.banner.show(text, MessageKind::Error).await;
                ActionOutcome::Rejected
            }
            Err(e) => {
                error!(action = kind.as_str(), activity, error = %e, "action_failed");
                self.banner
                    .show(kind.failed_message(), MessageKind::Error)
                    .await;
                ActionOutcome::Failed
            }
        }
    }
}
