use std::collections::HashMap;
use std::fmt;

pub const ENV_SERVER_URL: &str = "NETBOX_SERVER_URL";
pub const ENV_API_TOKEN: &str = "NETBOX_API_TOKEN";
pub const ENV_STRIP_TRAILING_SLASHES_FROM_URL: &str = "NETBOX_STRIP_TRAILING_SLASHES_FROM_URL";
pub const ENV_ALLOW_INSECURE_HTTPS: &str = "NETBOX_ALLOW_INSECURE_HTTPS";
pub const ENV_REQUEST_TIMEOUT: &str = "NETBOX_REQUEST_TIMEOUT";

/// Every variable the resolver may consult.
pub const ENV_KEYS: [&str; 5] = [
    ENV_SERVER_URL,
    ENV_API_TOKEN,
    ENV_STRIP_TRAILING_SLASHES_FROM_URL,
    ENV_ALLOW_INSECURE_HTTPS,
    ENV_REQUEST_TIMEOUT,
];

/// Read-only snapshot of the `NETBOX_*` environment variables.
///
/// Taken once and injected into the resolver so that resolution is a pure
/// function of the raw config and this snapshot.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnvironmentOverrides {
    vars: HashMap<String, String>,
}

impl EnvironmentOverrides {
    /// An empty snapshot: no overrides at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot the relevant variables from the current process.
    pub fn from_process() -> Self {
        let vars = ENV_KEYS
            .iter()
            .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)))
            .collect();
        Self { vars }
    }

    /// Build a snapshot from explicit pairs (tests, embedding hosts).
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn server_url(&self) -> Option<String> {
        self.get(ENV_SERVER_URL).map(str::to_string)
    }

    pub fn api_token(&self) -> Option<String> {
        self.get(ENV_API_TOKEN).map(str::to_string)
    }

    /// Only the literal `false` disables stripping; any other value enables it.
    pub fn strip_trailing_slashes(&self) -> Option<bool> {
        self.get(ENV_STRIP_TRAILING_SLASHES_FROM_URL)
            .map(|v| v != "false")
    }

    /// Only the literal `true` enables insecure TLS.
    pub fn allow_insecure_https(&self) -> Option<bool> {
        self.get(ENV_ALLOW_INSECURE_HTTPS).map(|v| v == "true")
    }

    /// Raw timeout string; parsing is the resolver's job so it can report errors.
    pub fn request_timeout(&self) -> Option<&str> {
        self.get(ENV_REQUEST_TIMEOUT)
    }
}

impl fmt::Debug for EnvironmentOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.vars.keys().map(String::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("EnvironmentOverrides")
            .field("keys", &keys)
            .finish()
    }
}
