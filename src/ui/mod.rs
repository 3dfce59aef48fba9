pub mod actions;
pub mod banner;
pub mod cards;
pub mod page;
pub mod renderer;

pub use actions::{ActionHandler, ActionOutcome, SignupSubmission};
pub use banner::MessageBanner;
pub use cards::{ActivityCard, ParticipantRow, UnregisterBinding};
pub use page::{MessageKind, PageHandles, PageSnapshot};
pub use renderer::{ActivityRenderer, RenderOutcome};
