use reqwest::Method;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Observer attached to the transport. It only sees request metadata and
/// never touches request or response bodies.
pub trait TransportHook: Send + Sync {
    fn on_request(&self, method: &Method, url: &Url);

    fn on_response(&self, method: &Method, url: &Url, status: u16, elapsed: Duration);

    fn on_error(&self, method: &Method, url: &Url, error: &str);
}

/// Default hook: request/response tracing through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHook;

impl TransportHook for TracingHook {
    fn on_request(&self, method: &Method, url: &Url) {
        debug!(%method, %url, "sending netbox api request");
    }

    fn on_response(&self, method: &Method, url: &Url, status: u16, elapsed: Duration) {
        debug!(
            %method,
            %url,
            status,
            elapsed_ms = elapsed.as_millis() as u64,
            "netbox api response"
        );
    }

    fn on_error(&self, method: &Method, url: &Url, error: &str) {
        warn!(%method, %url, error, "netbox api request failed");
    }
}
