pub mod activities_api_service;

pub use activities_api_service::{ActivitiesApi, ActivitiesApiError, ActivitiesBackend};
