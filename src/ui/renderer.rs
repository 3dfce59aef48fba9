use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info};

use super::cards::build_activity_cards;
use super::page::{ActivityListState, PageHandles, LOAD_FAILED_MESSAGE};
use crate::services::ActivitiesBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Applied { activities: usize },
    Failed,
    /// A newer render was issued while this one was in flight; its result was dropped.
    Superseded,
}

/// Fetches the full activity collection and redraws the list and the select.
#[derive(Clone)]
pub struct ActivityRenderer {
    backend: Arc<dyn ActivitiesBackend>,
    handles: PageHandles,
    generation: Arc<AtomicU64>,
}

impl ActivityRenderer {
    pub fn new(backend: Arc<dyn ActivitiesBackend>, handles: PageHandles) -> Self {
        Self {
            backend,
            handles,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn render(&self) -> RenderOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "render_started");

        let fetched = self.backend.fetch_activities().await;

        // Held across the staleness check so two completing renders cannot interleave
        // their writes to the list and the select.
        let mut list = self.handles.list.lock().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "render_superseded");
            return RenderOutcome::Superseded;
        }

        match fetched {
            Ok(activities) => {
                let cards = build_activity_cards(&activities);
                let mut select = self.handles.select.lock().await;
                select.clear_to_placeholder();
                for name in activities.names() {
                    select.push_activity(name);
                }
                *list = ActivityListState::Cards(cards);
                info!(generation, activities = activities.len(), "render_applied");
                RenderOutcome::Applied {
                    activities: activities.len(),
                }
            }
            Err(e) => {
                *list = ActivityListState::Failed(LOAD_FAILED_MESSAGE.to_string());
                error!(generation, error = %e, "Error fetching activities");
                RenderOutcome::Failed
            }
        }
    }
}
