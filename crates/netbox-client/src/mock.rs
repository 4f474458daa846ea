//! Mock NetBox client for deterministic testing of resource code.
//!
//! Returns pre-configured responses without making any HTTP calls.

use async_trait::async_trait;
use netbox_core::{NetboxError, Result};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use url::Url;

use crate::client::{ApiClient, Scheme};

/// A request the mock received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

/// A client that replays queued responses in order.
///
/// # Example
/// ```
/// use netbox_client::MockClient;
/// let client = MockClient::new().with_response(serde_json::json!({"id": 1}));
/// ```
pub struct MockClient {
    base_url: Url,
    schemes: Vec<Scheme>,
    responses: Arc<Mutex<VecDeque<Result<serde_json::Value>>>>,
    /// Track all requests received (for assertions in tests).
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockClient {
    pub fn new() -> Self {
        Self {
            base_url: Url::parse("https://netbox.invalid/api/").expect("static url is valid"),
            schemes: vec![Scheme::Https],
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a successful response.
    pub fn with_response(self, body: serde_json::Value) -> Self {
        self.responses.lock().push_back(Ok(body));
        self
    }

    /// Queue an API error response.
    pub fn with_api_error(self, status: u16, body: &str) -> Self {
        self.responses.lock().push_back(Err(NetboxError::Api {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn respond(
        &self,
        method: &'static str,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value> {
        self.requests.lock().push(RecordedRequest {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        self.responses
            .lock()
            .pop_front()
            .unwrap_or(Ok(serde_json::Value::Null))
    }
}

#[async_trait]
impl ApiClient for MockClient {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    async fn get(&self, path: &str) -> Result<serde_json::Value> {
        self.respond("GET", path, None)
    }

    async fn post(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        self.respond("POST", path, Some(body))
    }

    async fn patch(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        self.respond("PATCH", path, Some(body))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.respond("DELETE", path, None).map(|_| ())
    }
}
