use netbox_core::{Diagnostic, DiagnosticKind, Diagnostics, FieldPath, Secret, Validated};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::debug;

use crate::env::{self, EnvironmentOverrides};
use crate::raw::{RawConfig, keys};

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Connection settings after every source has been merged and checked.
///
/// Only [`ConfigResolver::resolve`] builds one, so holding a value means:
/// `server_url` and `api_token` are non-empty, the timeout is positive, and
/// no header shadows `Authorization`.
#[derive(Clone, PartialEq)]
pub struct ResolvedConfig {
    server_url: String,
    api_token: Secret,
    strip_trailing_slashes: bool,
    allow_insecure_https: bool,
    request_timeout: Duration,
    headers: BTreeMap<String, String>,
}

impl ResolvedConfig {
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn api_token(&self) -> &Secret {
        &self.api_token
    }

    pub fn strip_trailing_slashes(&self) -> bool {
        self.strip_trailing_slashes
    }

    pub fn allow_insecure_https(&self) -> bool {
        self.allow_insecure_https
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }
}

impl fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("server_url", &self.server_url)
            .field("api_token", &self.api_token)
            .field("strip_trailing_slashes", &self.strip_trailing_slashes)
            .field("allow_insecure_https", &self.allow_insecure_https)
            .field("request_timeout", &self.request_timeout)
            .field("headers", &self.headers.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Merges a [`RawConfig`] with an environment snapshot.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    env: EnvironmentOverrides,
}

impl ConfigResolver {
    pub fn new(env: EnvironmentOverrides) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &EnvironmentOverrides {
        &self.env
    }

    /// Resolve `raw` into a [`ResolvedConfig`].
    ///
    /// Every check runs regardless of earlier failures. Returns all
    /// diagnostics when at least one is an error; otherwise the config plus
    /// any warnings.
    pub fn resolve(&self, raw: &RawConfig) -> Result<Validated<ResolvedConfig>, Diagnostics> {
        let mut diags = Diagnostics::new();

        // ── Unknown values ───
        for field in raw.unknown_fields() {
            diags.push(unknown_value(field));
        }

        // ── Server URL ───
        let mut server_url = None;
        if !raw.server_url.is_unknown() {
            let url = raw
                .server_url
                .or_fallback(|| self.env.server_url())
                .unwrap_or_default();
            if url.is_empty() {
                diags.push(missing_value(keys::SERVER_URL, env::ENV_SERVER_URL, "Server URL"));
            }
            server_url = Some(url);
        }

        // ── API token ───
        let mut api_token = None;
        if !raw.api_token.is_unknown() {
            let token = raw
                .api_token
                .or_fallback(|| self.env.api_token().map(Secret::from))
                .unwrap_or_default();
            if token.is_empty() {
                diags.push(missing_value(keys::API_TOKEN, env::ENV_API_TOKEN, "API Token"));
            }
            api_token = Some(token);
        }

        // ── Flags ───
        let strip_trailing_slashes = (!raw.strip_trailing_slashes_from_url.is_unknown()).then(|| {
            raw.strip_trailing_slashes_from_url
                .or_fallback(|| self.env.strip_trailing_slashes())
                .unwrap_or(true)
        });
        let allow_insecure_https = (!raw.allow_insecure_https.is_unknown()).then(|| {
            raw.allow_insecure_https
                .or_fallback(|| self.env.allow_insecure_https())
                .unwrap_or(false)
        });

        // ── Timeout ───
        let request_timeout = if raw.request_timeout.is_unknown() {
            None
        } else {
            self.select_timeout(raw, &mut diags)
        };

        // ── Headers ───
        let headers = match raw.headers.explicit() {
            Some(headers) => {
                check_headers(headers, &mut diags);
                headers.clone()
            }
            None => BTreeMap::new(),
        };

        // ── Normalization ───
        if let (Some(true), Some(url)) = (strip_trailing_slashes, server_url.as_mut()) {
            let original = url.clone();
            let mut trimmed = false;
            while url.ends_with('/') {
                url.pop();
                trimmed = true;
            }
            if trimmed {
                diags.push(Diagnostic::warning(
                    DiagnosticKind::NormalizationWarning,
                    keys::STRIP_TRAILING_SLASHES_FROM_URL,
                    "Stripped trailing slashes from the `server_url` parameter",
                    format!(
                        "Trailing slashes in the `server_url` parameter lead to problems in most setups, \
                         so '{original}' was rewritten to '{url}'. Set `{}` to false to keep them, \
                         or remove all trailing slashes from `server_url` to silence this warning.",
                        keys::STRIP_TRAILING_SLASHES_FROM_URL
                    ),
                ));
                if url.is_empty() {
                    diags.push(missing_value(keys::SERVER_URL, env::ENV_SERVER_URL, "Server URL"));
                }
            }
        }

        let (
            Some(server_url),
            Some(api_token),
            Some(strip_trailing_slashes),
            Some(allow_insecure_https),
            Some(request_timeout),
        ) = (
            server_url,
            api_token,
            strip_trailing_slashes,
            allow_insecure_https,
            request_timeout,
        )
        else {
            return Err(diags);
        };

        if diags.has_error() {
            return Err(diags);
        }

        debug!(
            server_url = %server_url,
            strip_trailing_slashes,
            allow_insecure_https,
            timeout_secs = request_timeout.as_secs(),
            headers = headers.len(),
            "resolved netbox configuration"
        );

        diags.finish(ResolvedConfig {
            server_url,
            api_token,
            strip_trailing_slashes,
            allow_insecure_https,
            request_timeout,
            headers,
        })
    }

    fn select_timeout(&self, raw: &RawConfig, diags: &mut Diagnostics) -> Option<Duration> {
        let secs = match raw.request_timeout.explicit() {
            Some(secs) => *secs,
            None => match self.env.request_timeout() {
                Some(value) => match value.trim().parse::<u64>() {
                    Ok(secs) => secs,
                    Err(_) => {
                        diags.push(Diagnostic::error(
                            DiagnosticKind::InvalidValue,
                            keys::REQUEST_TIMEOUT,
                            "Invalid NetBox request timeout",
                            format!(
                                "The {} environment variable is set to '{value}', \
                                 which is not a whole number of seconds.",
                                env::ENV_REQUEST_TIMEOUT
                            ),
                        ));
                        return None;
                    }
                },
                None => DEFAULT_REQUEST_TIMEOUT_SECS,
            },
        };

        if secs == 0 {
            diags.push(Diagnostic::error(
                DiagnosticKind::InvalidValue,
                keys::REQUEST_TIMEOUT,
                "Invalid NetBox request timeout",
                "The request timeout must be at least one second.",
            ));
            return None;
        }
        Some(Duration::from_secs(secs))
    }
}

fn check_headers(headers: &BTreeMap<String, String>, diags: &mut Diagnostics) {
    for name in headers.keys() {
        let field = FieldPath::root(keys::HEADERS).child(name);
        if name.trim().is_empty() {
            diags.push(Diagnostic::error(
                DiagnosticKind::InvalidValue,
                field,
                "Empty header name",
                "Every entry in `headers` needs a non-empty name.",
            ));
        } else if name.eq_ignore_ascii_case("authorization") {
            diags.push(Diagnostic::error(
                DiagnosticKind::InvalidValue,
                field,
                "Reserved header name",
                "The Authorization header is derived from `api_token` and cannot be set in `headers`.",
            ));
        }
    }
}

fn unknown_value(field: &'static str) -> Diagnostic {
    let (label, env_var) = match field {
        keys::SERVER_URL => ("NetBox Server URL", Some(env::ENV_SERVER_URL)),
        keys::API_TOKEN => ("NetBox API Token", Some(env::ENV_API_TOKEN)),
        keys::STRIP_TRAILING_SLASHES_FROM_URL => (
            "trailing slash setting",
            Some(env::ENV_STRIP_TRAILING_SLASHES_FROM_URL),
        ),
        keys::ALLOW_INSECURE_HTTPS => ("insecure HTTPS setting", Some(env::ENV_ALLOW_INSECURE_HTTPS)),
        keys::REQUEST_TIMEOUT => ("request timeout", Some(env::ENV_REQUEST_TIMEOUT)),
        _ => ("request headers", None),
    };
    let remedy = match env_var {
        Some(var) => format!(
            "Either target apply the source of the value first, set the value statically in the configuration, or use the {var} environment variable."
        ),
        None => "Either target apply the source of the value first, or set the value statically in the configuration.".to_string(),
    };
    Diagnostic::error(
        DiagnosticKind::UnknownAtResolutionTime,
        field,
        format!("Unknown {label}"),
        format!(
            "The provider cannot create the NetBox API client as there is an unknown configuration value for the {label}. {remedy}"
        ),
    )
}

fn missing_value(field: &'static str, env_var: &str, label: &str) -> Diagnostic {
    Diagnostic::error(
        DiagnosticKind::MissingRequiredValue,
        field,
        format!("Missing NetBox {label}"),
        format!(
            "The provider cannot create the NetBox API client as there is a missing configuration value for the NetBox {label}. \
             Set `{field}` in the configuration or use the {env_var} environment variable. \
             If either is already set, ensure the value is not empty."
        ),
    )
}
