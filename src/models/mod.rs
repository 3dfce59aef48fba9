pub mod activities;
pub mod api_messages;

pub use activities::{ActivityCollection, ActivityDetails};
pub use api_messages::{ErrorBody, MessageBody};
