#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use activities_frontend::models::{ActivityCollection, MessageBody};
use activities_frontend::services::{ActivitiesApiError, ActivitiesBackend};
use async_trait::async_trait;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use tokio::sync::oneshot;

pub const CHESS_CLUB_JSON: &str = r#"{"Chess Club": {"description": "d", "schedule": "Mon", "max_participants": 10, "participants": ["a@x.com"]}}"#;

pub const SCHOOL_JSON: &str = r#"{
    "Programming Class": {"description": "Learn programming fundamentals", "schedule": "Tuesdays and Thursdays, 3:30 PM - 4:30 PM", "max_participants": 20, "participants": ["emma@mergington.edu", "sophia@mergington.edu"]},
    "Basketball Team": {"description": "Competitive basketball", "schedule": "Mondays and Thursdays, 4:00 PM - 5:30 PM", "max_participants": 15, "participants": []},
    "Art Studio": {"description": "Painting & drawing", "schedule": "Wednesdays, 3:30 PM - 5:00 PM", "max_participants": 1, "participants": ["a@mergington.edu", "b@mergington.edu"]}
}"#;

pub fn collection(raw: &str) -> ActivityCollection {
    serde_json::from_str(raw).expect("collection json")
}

/// Address nothing listens on.
pub async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    addr
}

pub async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    addr
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub activity: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct CannedReply {
    pub status: StatusCode,
    pub body: String,
}

impl CannedReply {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status: StatusCode::from_u16(status).expect("status"),
            body: body.to_string(),
        }
    }
}

#[derive(Debug)]
struct StubInner {
    activities: CannedReply,
    signup: CannedReply,
    unregister: CannedReply,
    fetches: usize,
    calls: Vec<RecordedCall>,
}

/// HTTP stand-in for the activities backend.
#[derive(Debug, Clone)]
pub struct StubBackend {
    inner: Arc<Mutex<StubInner>>,
}

#[derive(Debug, Deserialize)]
struct EmailQuery {
    email: String,
}

impl StubBackend {
    pub fn new(activities_json: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(StubInner {
                activities: CannedReply::new(200, activities_json),
                signup: CannedReply::new(200, r#"{"message": "Signed up"}"#),
                unregister: CannedReply::new(200, r#"{"message": "Unregistered"}"#),
                fetches: 0,
                calls: Vec::new(),
            })),
        }
    }

    pub fn set_activities(&self, reply: CannedReply) {
        self.inner.lock().expect("stub lock").activities = reply;
    }

    pub fn set_signup(&self, reply: CannedReply) {
        self.inner.lock().expect("stub lock").signup = reply;
    }

    pub fn set_unregister(&self, reply: CannedReply) {
        self.inner.lock().expect("stub lock").unregister = reply;
    }

    pub fn fetches(&self) -> usize {
        self.inner.lock().expect("stub lock").fetches
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.lock().expect("stub lock").calls.clone()
    }

    pub async fn start(&self) -> String {
        let app = Router::new()
            .route("/activities", get(stub_activities))
            .route("/activities/:name/signup", post(stub_signup))
            .route("/activities/:name/unregister", delete(stub_unregister))
            .with_state(self.clone());
        let addr = serve(app).await;
        format!("http://{}", addr)
    }
}

fn reply(canned: CannedReply) -> Response {
    (
        canned.status,
        [(header::CONTENT_TYPE, "application/json")],
        canned.body,
    )
        .into_response()
}

async fn stub_activities(State(stub): State<StubBackend>) -> Response {
    let canned = {
        let mut inner = stub.inner.lock().expect("stub lock");
        inner.fetches += 1;
        inner.activities.clone()
    };
    reply(canned)
}

async fn stub_signup(
    State(stub): State<StubBackend>,
    Path(name): Path<String>,
    Query(q): Query<EmailQuery>,
) -> Response {
    let canned = {
        let mut inner = stub.inner.lock().expect("stub lock");
        inner.calls.push(RecordedCall {
            method: "POST",
            activity: name,
            email: q.email,
        });
        inner.signup.clone()
    };
    reply(canned)
}

async fn stub_unregister(
    State(stub): State<StubBackend>,
    Path(name): Path<String>,
    Query(q): Query<EmailQuery>,
) -> Response {
    let canned = {
        let mut inner = stub.inner.lock().expect("stub lock");
        inner.calls.push(RecordedCall {
            method: "DELETE",
            activity: name,
            email: q.email,
        });
        inner.unregister.clone()
    };
    reply(canned)
}

pub type ActionReply = Box<dyn Fn() -> Result<MessageBody, ActivitiesApiError> + Send + Sync>;

struct ScriptedFetch {
    gate: Option<oneshot::Receiver<()>>,
    reply: Result<ActivityCollection, ActivitiesApiError>,
}

/// In-process backend for tests that need paused time or precise interleaving.
pub struct FakeBackend {
    default_collection: ActivityCollection,
    scripted: Mutex<VecDeque<ScriptedFetch>>,
    action_reply: ActionReply,
    fetches: AtomicUsize,
    actions: AtomicUsize,
}

impl FakeBackend {
    pub fn new(collection: ActivityCollection, action_reply: ActionReply) -> Self {
        Self {
            default_collection: collection,
            scripted: Mutex::new(VecDeque::new()),
            action_reply,
            fetches: AtomicUsize::new(0),
            actions: AtomicUsize::new(0),
        }
    }

    pub fn script_fetch(
        &self,
        gate: Option<oneshot::Receiver<()>>,
        reply: Result<ActivityCollection, ActivitiesApiError>,
    ) {
        self.scripted
            .lock()
            .expect("script lock")
            .push_back(ScriptedFetch { gate, reply });
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn actions(&self) -> usize {
        self.actions.load(Ordering::SeqCst)
    }
}

pub fn succeeds(message: &'static str) -> ActionReply {
    Box::new(move || {
        Ok(MessageBody {
            message: message.to_string(),
        })
    })
}

pub fn rejects(status: u16, detail: Option<&'static str>) -> ActionReply {
    Box::new(move || {
        Err(ActivitiesApiError::Rejected {
            status: StatusCode::from_u16(status).expect("status"),
            detail: detail.map(str::to_string),
        })
    })
}

pub fn transport_fails() -> ActionReply {
    Box::new(|| {
        Err(ActivitiesApiError::Transport {
            url: "http://127.0.0.1:9/activities".to_string(),
            reason: "connection refused".to_string(),
        })
    })
}

#[async_trait]
impl ActivitiesBackend for FakeBackend {
    async fn fetch_activities(&self) -> Result<ActivityCollection, ActivitiesApiError> {
        let scripted = self.scripted.lock().expect("script lock").pop_front();
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match scripted {
            Some(ScriptedFetch { gate, reply }) => {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                reply
            }
            None => Ok(self.default_collection.clone()),
        }
    }

    async fn signup(
        &self,
        _activity: &str,
        _email: &str,
    ) -> Result<MessageBody, ActivitiesApiError> {
        self.actions.fetch_add(1, Ordering::SeqCst);
        (self.action_reply)()
    }

    async fn unregister(
        &self,
        _activity: &str,
        _email: &str,
    ) -> Result<MessageBody, ActivitiesApiError> {
        self.actions.fetch_add(1, Ordering::SeqCst);
        (self.action_reply)()
    }
}
