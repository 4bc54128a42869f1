//! Shared test helpers for integration tests.
//!
//! `TestApp` wires the gateway router to a `FakeBackend`: an axum app on an
//! ephemeral port that records every call and answers with canned replies.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::extract::{Request, State};
use axum::response::Response;
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use spaces_api::AppState;
use spaces_auth::{SessionIssuer, SessionUser};
use spaces_core::config::AppConfig;

/// Session secret used by every test app.
pub const TEST_SECRET: &str = "integration-test-secret";

/// A request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// HTTP method
    pub method: String,
    /// Raw path, percent-encoding preserved
    pub path: String,
    /// `Authorization` header
    pub authorization: Option<String>,
    /// `Content-Type` header
    pub content_type: Option<String>,
    /// Raw body
    pub body: Bytes,
}

impl RecordedCall {
    /// Body parsed as JSON
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("backend body is JSON")
    }
}

/// A canned backend reply.
#[derive(Debug, Clone)]
pub struct CannedReply {
    /// Status code
    pub status: u16,
    /// Extra headers
    pub headers: Vec<(String, String)>,
    /// Body
    pub body: Bytes,
}

impl CannedReply {
    /// JSON reply
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: vec![("content-type".into(), "application/json".into())],
            body: Bytes::from(body.to_string()),
        }
    }

    /// Reply with an explicit content type
    pub fn typed(status: u16, content_type: &str, body: &'static [u8]) -> Self {
        Self {
            status,
            headers: vec![("content-type".into(), content_type.into())],
            body: Bytes::from_static(body),
        }
    }

    /// Reply without any headers
    pub fn bare(status: u16, body: &'static [u8]) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Bytes::from_static(body),
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Default)]
struct BackendLog {
    calls: Mutex<Vec<RecordedCall>>,
    replies: Mutex<HashMap<(String, String), CannedReply>>,
}

/// In-process stand-in for the backend service.
#[derive(Debug, Clone)]
pub struct FakeBackend {
    /// `http://127.0.0.1:port`
    pub origin: String,
    log: Arc<BackendLog>,
}

impl FakeBackend {
    /// Start on an ephemeral port.
    pub async fn start() -> Self {
        let log = Arc::new(BackendLog::default());
        let router = Router::new().fallback(record).with_state(log.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("fake backend");
        });

        Self {
            origin: format!("http://{addr}"),
            log,
        }
    }

    /// Answer `method path` with `reply` from now on.
    pub fn reply(&self, method: &str, path: &str, reply: CannedReply) {
        self.log
            .replies
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), reply);
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.log.calls.lock().unwrap().clone()
    }

    /// The single call received so far.
    pub fn only_call(&self) -> RecordedCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one backend call: {calls:?}");
        calls.into_iter().next().unwrap()
    }
}

async fn record(State(log): State<Arc<BackendLog>>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let call = RecordedCall {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body,
    };
    let key = (call.method.clone(), call.path.clone());
    log.calls.lock().unwrap().push(call);

    let reply = log
        .replies
        .lock()
        .unwrap()
        .get(&key)
        .cloned()
        .unwrap_or_else(|| CannedReply::json(200, serde_json::json!({})));

    let mut builder = Response::builder().status(reply.status);
    for (name, value) in &reply.headers {
        let value = HeaderValue::from_bytes(value.as_bytes()).expect("header value");
        builder = builder.header(name, value);
    }
    builder.body(Body::from(reply.body)).expect("canned reply")
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The backend the router forwards to
    pub backend: FakeBackend,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test application after adjusting the config
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let backend = FakeBackend::start().await;

        let mut config = AppConfig::default();
        config.backend.url = backend.origin.clone();
        config.session.secret = TEST_SECRET.to_string();
        adjust(&mut config);

        let state = AppState::new(config.clone()).expect("Failed to build state");
        let router = spaces_api::build_app(state);

        Self {
            router,
            backend,
            config,
        }
    }

    /// Mint a session token for `email`
    pub fn session_for(&self, email: &str) -> String {
        self.session_for_user(&SessionUser::new(email))
    }

    /// Mint a session token for a full user
    pub fn session_for_user(&self, user: &SessionUser) -> String {
        SessionIssuer::new(&self.config.session)
            .issue(user)
            .expect("Failed to issue session")
            .token
    }

    /// `Cookie` header value carrying `token`
    pub fn cookie(&self, token: &str) -> String {
        format!("{}={}", self.config.session.cookie_name, token)
    }

    /// Send a JSON request
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        session: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = http::Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = session {
            req = req.header("Cookie", self.cookie(token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prepared request
    pub async fn send(&self, req: http::Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let raw = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            raw,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub raw: Bytes,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
}

impl TestResponse {
    /// A header as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// A header as raw bytes, for values that are not plain ASCII
    pub fn raw_header(&self, name: &str) -> Option<&[u8]> {
        self.headers.get(name).map(|v| v.as_bytes())
    }
}
