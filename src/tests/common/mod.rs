// shared fixtures for the client tests
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use http::StatusCode;
use serde_json::{json, Value};

use crate::error::TransportError;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::{Credentials, EversendClient};

pub const BASE_URL: &str = "https://api.test.local/v1/";
pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";

type Handler = Box<dyn Fn(&str, &HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync>;

/// In-memory transport: records every request and answers through a handler
/// that receives the path relative to `BASE_URL`.
pub struct MockTransport {
    handler: Handler,
    delay: Duration,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&str, &HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering, to widen race windows.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn total_calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Number of requests sent to `path`.
    pub fn calls_to(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| relative_path(&r.url) == path)
            .count()
    }

    pub fn last_request_to(&self, path: &str) -> Option<HttpRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|r| relative_path(&r.url) == path)
            .cloned()
    }
}

impl HttpTransport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.handler)(relative_path(&request.url), &request)
    }
}

pub fn relative_path(url: &str) -> &str {
    url.strip_prefix(BASE_URL).unwrap_or(url)
}

pub fn respond(status: u16, body: Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::new(
        StatusCode::from_u16(status).unwrap(),
        body.to_string().into_bytes(),
    ))
}

pub fn auth_body(token: &str, expires: DateTime<Utc>) -> Value {
    json!({ "token": token, "expires": expires.to_rfc3339() })
}

pub fn in_one_hour() -> DateTime<Utc> {
    Utc::now() + chrono::Duration::hours(1)
}

/// Auth handler issuing `tok-1`, `tok-2`, ... valid for one hour.
pub fn counting_auth() -> impl Fn() -> Value + Send + Sync + 'static {
    let issued = Arc::new(AtomicUsize::new(0));
    move || {
        let n = issued.fetch_add(1, Ordering::SeqCst) + 1;
        auth_body(&format!("tok-{n}"), in_one_hour())
    }
}

/// Mock that answers `auth/token` with counting tokens and every other path
/// with `routes(path, request)`.
pub fn api_mock<F>(routes: F) -> Arc<MockTransport>
where
    F: Fn(&str, &HttpRequest) -> Result<HttpResponse, TransportError> + Send + Sync + 'static,
{
    let auth = counting_auth();
    Arc::new(MockTransport::new(move |path, request| {
        if path == "auth/token" {
            respond(200, auth())
        } else {
            routes(path, request)
        }
    }))
}

pub fn client_with(transport: Arc<MockTransport>) -> EversendClient<Arc<MockTransport>> {
    EversendClient::builder(Credentials::new(CLIENT_ID, CLIENT_SECRET))
        .base_url(BASE_URL)
        .transport(transport)
        .build_with_transport()
        .unwrap()
}

pub fn body_json(request: &HttpRequest) -> Value {
    serde_json::from_slice(request.body.as_deref().expect("request has a body")).unwrap()
}

pub fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}
