use async_trait::async_trait;
use netbox_core::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use url::Url;

/// URL scheme a transport is allowed to speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "http" => Some(Scheme::Http),
            "https" => Some(Scheme::Https),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the resource layer may do with the NetBox API.
///
/// Paths are relative to the API root (`<server_url>/api/`), e.g.
/// `dcim/devices/` or `ipam/prefixes/42/`.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Root every request path is joined onto.
    fn base_url(&self) -> &Url;

    /// Schemes this client will issue requests over.
    fn schemes(&self) -> &[Scheme];

    async fn get(&self, path: &str) -> Result<serde_json::Value>;

    async fn post(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value>;

    async fn patch(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value>;

    async fn delete(&self, path: &str) -> Result<()>;

    /// NetBox instance status (`GET status/`).
    async fn status(&self) -> Result<serde_json::Value> {
        self.get("status/").await
    }
}

/// Shared, read-only handle to a configured client.
///
/// Cloning is cheap; every clone talks through the same connection pool.
#[derive(Clone)]
pub struct ClientHandle(Arc<dyn ApiClient>);

impl ClientHandle {
    pub fn new(client: impl ApiClient + 'static) -> Self {
        Self(Arc::new(client))
    }

    pub fn from_arc(client: Arc<dyn ApiClient>) -> Self {
        Self(client)
    }

    pub fn as_arc(&self) -> Arc<dyn ApiClient> {
        Arc::clone(&self.0)
    }
}

impl Deref for ClientHandle {
    type Target = dyn ApiClient;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientHandle")
            .field("base_url", &self.0.base_url().as_str())
            .field("schemes", &self.0.schemes())
            .finish()
    }
}
