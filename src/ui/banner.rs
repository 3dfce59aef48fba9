use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use super::page::{MessageBannerState, MessageKind, Region};

pub const DEFAULT_HIDE_AFTER: Duration = Duration::from_millis(5000);

/// Message banner with auto-hide. Showing a new message cancels the pending
/// hide of the previous one, so every message stays up for the full delay.
#[derive(Clone)]
pub struct MessageBanner {
    state: Region<MessageBannerState>,
    hide_after: Duration,
    pending_hide: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl MessageBanner {
    pub fn new(state: Region<MessageBannerState>, hide_after: Duration) -> Self {
        Self {
            state,
            hide_after,
            pending_hide: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn show(&self, text: impl Into<String>, kind: MessageKind) {
        let mut pending = self.pending_hide.lock().await;
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let deadline = Instant::now() + self.hide_after;
        self.state.lock().await.show(text, kind, deadline);

        let state = self.state.clone();
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            state.lock().await.hide();
        }));
    }
}
