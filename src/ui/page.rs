use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;

use super::cards::ActivityCard;

pub const SELECT_PLACEHOLDER_LABEL: &str = "-- Select an activity --";
pub const NO_PARTICIPANTS_LABEL: &str = "No participants yet";
pub const LOADING_LABEL: &str = "Loading activities...";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load activities. Please try again later.";

/// Shared handle to one region of the page.
#[derive(Debug, Default)]
pub struct Region<T>(Arc<Mutex<T>>);

impl<T> Clone for Region<T> {
    fn clone(&self) -> Self {
        Region(Arc::clone(&self.0))
    }
}

impl<T> Region<T> {
    pub fn new(value: T) -> Self {
        Region(Arc::new(Mutex::new(value)))
    }

    pub async fn lock(&self) -> MutexGuard<'_, T> {
        self.0.lock().await
    }
}

impl<T: Clone> Region<T> {
    pub async fn snapshot(&self) -> T {
        self.0.lock().await.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActivityListState {
    #[default]
    Loading,
    Cards(Vec<ActivityCard>),
    Failed(String),
}

impl ActivityListState {
    pub fn cards(&self) -> &[ActivityCard] {
        match self {
            ActivityListState::Cards(cards) => cards,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ActivityListState::Loading)
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            ActivityListState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    fn placeholder() -> Self {
        SelectOption {
            value: String::new(),
            label: SELECT_PLACEHOLDER_LABEL.to_string(),
        }
    }
}

/// Options of the activity select. The placeholder is always the first entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySelectState {
    options: Vec<SelectOption>,
}

impl Default for ActivitySelectState {
    fn default() -> Self {
        ActivitySelectState {
            options: vec![SelectOption::placeholder()],
        }
    }
}

impl ActivitySelectState {
    pub fn clear_to_placeholder(&mut self) {
        self.options.truncate(1);
    }

    pub fn push_activity(&mut self, name: &str) {
        self.options.push(SelectOption {
            value: name.to_string(),
            label: name.to_string(),
        });
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn activity_names(&self) -> impl Iterator<Item = &str> {
        self.options[1..].iter().map(|o| o.value.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn css_class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBannerState {
    pub text: String,
    pub kind: Option<MessageKind>,
    pub hidden: bool,
    /// When the pending hide fires. `None` while hidden.
    pub hides_at: Option<Instant>,
}

impl Default for MessageBannerState {
    fn default() -> Self {
        MessageBannerState {
            text: String::new(),
            kind: None,
            hidden: true,
            hides_at: None,
        }
    }
}

impl MessageBannerState {
    pub fn show(&mut self, text: impl Into<String>, kind: MessageKind, hides_at: Instant) {
        self.text = text.into();
        self.kind = Some(kind);
        self.hidden = false;
        self.hides_at = Some(hides_at);
    }

    pub fn hide(&mut self) {
        self.hidden = true;
        self.hides_at = None;
    }

    /// Time the visible message has left on screen, measured from `now`.
    pub fn hides_in(&self, now: Instant) -> Option<Duration> {
        if self.hidden {
            return None;
        }
        self.hides_at.map(|at| at.saturating_duration_since(now))
    }

    pub fn class_list(&self) -> String {
        let mut classes = Vec::new();
        if let Some(kind) = self.kind {
            classes.push(kind.css_class());
        }
        if self.hidden {
            classes.push("hidden");
        }
        classes.join(" ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupFormState {
    pub email: String,
    pub activity: String,
}

impl SignupFormState {
    pub fn fill(&mut self, email: impl Into<String>, activity: impl Into<String>) {
        self.email = email.into();
        self.activity = activity.into();
    }

    pub fn reset(&mut self) {
        *self = SignupFormState::default();
    }
}

/// The four page regions, created once when the page is mounted and handed to
/// the renderer, the action handler and the browser routes.
///
/// The list and the select are drawn from the backend and are the same for
/// everyone; the banner and the form belong to one visitor.
#[derive(Debug, Clone)]
pub struct PageHandles {
    pub list: Region<ActivityListState>,
    pub select: Region<ActivitySelectState>,
    pub banner: Region<MessageBannerState>,
    pub form: Region<SignupFormState>,
}

/// Point-in-time copy of every region, used to draw the page.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub list: ActivityListState,
    pub select: ActivitySelectState,
    pub banner: MessageBannerState,
    pub form: SignupFormState,
}

impl PageHandles {
    pub fn mount() -> Self {
        PageHandles {
            list: Region::new(ActivityListState::default()),
            select: Region::new(ActivitySelectState::default()),
            banner: Region::new(MessageBannerState::default()),
            form: Region::new(SignupFormState::default()),
        }
    }

    /// Handles for another visitor: same list and select, own banner and form.
    pub fn for_visitor(&self) -> Self {
        PageHandles {
            list: self.list.clone(),
            select: self.select.clone(),
            banner: Region::new(MessageBannerState::default()),
            form: Region::new(SignupFormState::default()),
        }
    }

    pub async fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            list: self.list.snapshot().await,
            select: self.select.snapshot().await,
            banner: self.banner.snapshot().await,
            form: self.form.snapshot().await,
        }
    }
}
