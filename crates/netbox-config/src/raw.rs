use netbox_core::Secret;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::value::ConfigValue;

/// Attribute names, as they appear in configuration and diagnostics.
pub mod keys {
    pub const SERVER_URL: &str = "server_url";
    pub const API_TOKEN: &str = "api_token";
    pub const STRIP_TRAILING_SLASHES_FROM_URL: &str = "strip_trailing_slashes_from_url";
    pub const ALLOW_INSECURE_HTTPS: &str = "allow_insecure_https";
    pub const REQUEST_TIMEOUT: &str = "request_timeout";
    pub const HEADERS: &str = "headers";
}

/// Provider configuration exactly as supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// Base URL of the NetBox instance, e.g. `https://netbox.example.com`.
    #[serde(skip_serializing_if = "ConfigValue::is_absent")]
    pub server_url: ConfigValue<String>,
    /// API token sent as `Authorization: Token <api_token>`.
    #[serde(skip_serializing_if = "ConfigValue::is_absent")]
    pub api_token: ConfigValue<Secret>,
    /// Strip trailing `/` from `server_url`. Default: true.
    #[serde(skip_serializing_if = "ConfigValue::is_absent")]
    pub strip_trailing_slashes_from_url: ConfigValue<bool>,
    /// Skip TLS certificate verification. Default: false.
    #[serde(skip_serializing_if = "ConfigValue::is_absent")]
    pub allow_insecure_https: ConfigValue<bool>,
    /// Per-request timeout in seconds. Default: 10.
    #[serde(skip_serializing_if = "ConfigValue::is_absent")]
    pub request_timeout: ConfigValue<u64>,
    /// Extra headers sent with every request.
    #[serde(skip_serializing_if = "ConfigValue::is_absent")]
    pub headers: ConfigValue<BTreeMap<String, String>>,
}

impl RawConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = ConfigValue::Set(url.into());
        self
    }

    pub fn with_api_token(mut self, token: impl Into<Secret>) -> Self {
        self.api_token = ConfigValue::Set(token.into());
        self
    }

    pub fn with_strip_trailing_slashes(mut self, strip: bool) -> Self {
        self.strip_trailing_slashes_from_url = ConfigValue::Set(strip);
        self
    }

    pub fn with_allow_insecure_https(mut self, allow: bool) -> Self {
        self.allow_insecure_https = ConfigValue::Set(allow);
        self
    }

    pub fn with_request_timeout(mut self, secs: u64) -> Self {
        self.request_timeout = ConfigValue::Set(secs);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers = match self.headers {
            ConfigValue::Set(h) => h,
            _ => BTreeMap::new(),
        };
        headers.insert(name.into(), value.into());
        self.headers = ConfigValue::Set(headers);
        self
    }

    /// Attribute names whose value the host has not computed yet.
    pub fn unknown_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.server_url.is_unknown() {
            fields.push(keys::SERVER_URL);
        }
        if self.api_token.is_unknown() {
            fields.push(keys::API_TOKEN);
        }
        if self.strip_trailing_slashes_from_url.is_unknown() {
            fields.push(keys::STRIP_TRAILING_SLASHES_FROM_URL);
        }
        if self.allow_insecure_https.is_unknown() {
            fields.push(keys::ALLOW_INSECURE_HTTPS);
        }
        if self.request_timeout.is_unknown() {
            fields.push(keys::REQUEST_TIMEOUT);
        }
        if self.headers.is_unknown() {
            fields.push(keys::HEADERS);
        }
        fields
    }
}
