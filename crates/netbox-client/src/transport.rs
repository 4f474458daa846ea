use async_trait::async_trait;
use netbox_core::{NetboxError, Result};
use reqwest::{Client, Method};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

use crate::client::{ApiClient, Scheme};
use crate::hook::TransportHook;

/// reqwest-backed NetBox transport.
///
/// Built by [`crate::ClientBootstrapper`]; holds no open connections until
/// the first request.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    schemes: Vec<Scheme>,
    timeout: Duration,
    insecure: bool,
    hook: Arc<dyn TransportHook>,
}

impl HttpTransport {
    pub(crate) fn new(
        client: Client,
        base_url: Url,
        scheme: Scheme,
        timeout: Duration,
        insecure: bool,
        hook: Arc<dyn TransportHook>,
    ) -> Self {
        Self {
            client,
            base_url,
            schemes: vec![scheme],
            timeout,
            insecure,
            hook,
        }
    }

    pub fn host(&self) -> &str {
        self.base_url.host_str().unwrap_or_default()
    }

    /// Effective root path, e.g. `/netbox/api/`.
    pub fn base_path(&self) -> &str {
        self.base_url.path()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether certificate verification is turned off.
    pub fn is_insecure(&self) -> bool {
        self.insecure
    }

    /// Absolute URL for an API path, restricted to the base path and the
    /// allowed schemes.
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let url = self.base_url.join(path.trim_start_matches('/'))?;

        if !self.schemes.iter().any(|s| s.as_str() == url.scheme()) {
            return Err(NetboxError::SchemeNotAllowed {
                scheme: url.scheme().to_string(),
                allowed: self
                    .schemes
                    .iter()
                    .map(Scheme::as_str)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
        if url.host_str() != self.base_url.host_str()
            || url.port_or_known_default() != self.base_url.port_or_known_default()
            || !url.path().starts_with(self.base_url.path())
        {
            return Err(NetboxError::InvalidPath {
                path: path.to_string(),
                reason: format!("resolves outside {}", self.base_url),
            });
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Option<serde_json::Value>> {
        let url = self.endpoint(path)?;

        let mut builder = self
            .client
            .request(method.clone(), url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let request = builder
            .build()
            .map_err(|e| NetboxError::Transport(e.to_string()))?;

        self.hook.on_request(&method, &url);
        let started = Instant::now();
        let resp = match self.client.execute(request).await {
            Ok(resp) => resp,
            Err(e) => {
                let message = e.to_string();
                self.hook.on_error(&method, &url, &message);
                return Err(NetboxError::Transport(message));
            }
        };
        let status = resp.status();
        self.hook
            .on_response(&method, &url, status.as_u16(), started.elapsed());

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| NetboxError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(NetboxError::Api {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

#[async_trait]
impl ApiClient for HttpTransport {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn schemes(&self) -> &[Scheme] {
        &self.schemes
    }

    async fn get(&self, path: &str) -> Result<serde_json::Value> {
        Ok(self
            .send(Method::GET, path, None)
            .await?
            .unwrap_or(serde_json::Value::Null))
    }

    async fn post(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        Ok(self
            .send(Method::POST, path, Some(body))
            .await?
            .unwrap_or(serde_json::Value::Null))
    }

    async fn patch(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        Ok(self
            .send(Method::PATCH, path, Some(body))
            .await?
            .unwrap_or(serde_json::Value::Null))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.send(Method::DELETE, path, None).await?;
        Ok(())
    }
}
