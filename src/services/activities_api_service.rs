use async_trait::async_trait;
use http::StatusCode;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{ActivityCollection, ErrorBody, MessageBody};

#[derive(Debug, Error)]
pub enum ActivitiesApiError {
    #[error("activities api unreachable at {url}: {reason}")]
    Transport { url: String, reason: String },

    #[error("activities api rejected the request with {status}")]
    Rejected {
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("activities api sent an unreadable body from {url}: {reason}")]
    Malformed { url: String, reason: String },

    #[error("invalid activities api base url: {0}")]
    InvalidBaseUrl(String),
}

impl ActivitiesApiError {
    /// Server-provided detail of a rejection, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ActivitiesApiError::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

/// The three backend calls the page needs. Implemented over HTTP by [`ActivitiesApi`].
#[async_trait]
pub trait ActivitiesBackend: Send + Sync {
    async fn fetch_activities(&self) -> Result<ActivityCollection, ActivitiesApiError>;

    async fn signup(
        &self,
        activity: &str,
        email: &str,
    ) -> Result<MessageBody, ActivitiesApiError>;

    async fn unregister(
        &self,
        activity: &str,
        email: &str,
    ) -> Result<MessageBody, ActivitiesApiError>;
}

/// Thin client for the activities backend. Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ActivitiesApi {
    client: reqwest::Client,
    base_url: Url,
}

impl ActivitiesApi {
    pub fn new(base_url: &str) -> Result<Self, ActivitiesApiError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| ActivitiesApiError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ActivitiesApiError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // Each segment is pushed individually so names like "Art/Design" stay one segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ActivitiesApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ActivitiesApiError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        email: Option<&str>,
    ) -> Result<T, ActivitiesApiError> {
        let target = url.to_string();
        let mut req = self.client.request(method.clone(), url);
        if let Some(email) = email {
            req = req.query(&[("email", email)]);
        }

        debug!(%method, url = %target, "activities_api_request");
        let resp = req.send().await.map_err(|e| transport_failed(&target, e))?;
        let status = resp.status();
        let body = resp.bytes().await.map_err(|e| transport_failed(&target, e))?;

        if !status.is_success() {
            let parsed: ErrorBody =
                serde_json::from_slice(&body).map_err(|e| malformed(&target, e))?;
            warn!(%status, url = %target, detail = ?parsed.detail, "activities_api_rejected");
            return Err(ActivitiesApiError::Rejected {
                status,
                detail: parsed.into_message(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| malformed(&target, e))
    }
}

#[async_trait]
impl ActivitiesBackend for ActivitiesApi {
    async fn fetch_activities(&self) -> Result<ActivityCollection, ActivitiesApiError> {
        let url = self.endpoint(&["activities"])?;
        self.send(Method::GET, url, None).await
    }

    async fn signup(
        &self,
        activity: &str,
        email: &str,
    ) -> Result<MessageBody, ActivitiesApiError> {
        let url = self.endpoint(&["activities", activity, "signup"])?;
        self.send(Method::POST, url, Some(email)).await
    }

    async fn unregister(
        &self,
        activity: &str,
        email: &str,
    ) -> Result<MessageBody, ActivitiesApiError> {
        let url = self.endpoint(&["activities", activity, "unregister"])?;
        self.send(Method::DELETE, url, Some(email)).await
    }
}

fn transport_failed(url: &str, err: impl ToString) -> ActivitiesApiError {
    ActivitiesApiError::Transport {
        url: url.to_string(),
        reason: err.to_string(),
    }
}

fn malformed(url: &str, err: impl ToString) -> ActivitiesApiError {
    ActivitiesApiError::Malformed {
        url: url.to_string(),
        reason: err.to_string(),
    }
}
