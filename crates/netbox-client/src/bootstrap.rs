use netbox_config::ResolvedConfig;
use netbox_config::raw::keys;
use netbox_core::{Diagnostic, DiagnosticKind, Diagnostics, FieldPath, Validated};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::client::{ClientHandle, Scheme};
use crate::hook::{TracingHook, TransportHook};
use crate::transport::HttpTransport;

/// Path segment NetBox serves its REST API under.
pub const DEFAULT_BASE_PATH: &str = "/api";

const USER_AGENT: &str = concat!("netbox-provider/", env!("CARGO_PKG_VERSION"));

/// Builds [`ClientHandle`]s from resolved configuration.
///
/// Construction is purely in-memory: no DNS lookups, no sockets.
#[derive(Clone)]
pub struct ClientBootstrapper {
    hook: Arc<dyn TransportHook>,
}

impl Default for ClientBootstrapper {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBootstrapper {
    /// Bootstrapper that traces requests with [`TracingHook`].
    pub fn new() -> Self {
        Self {
            hook: Arc::new(TracingHook),
        }
    }

    pub fn with_hook(hook: Arc<dyn TransportHook>) -> Self {
        Self { hook }
    }

    /// Build the shared client handle for `cfg`.
    pub fn bootstrap(&self, cfg: &ResolvedConfig) -> Result<Validated<ClientHandle>, Diagnostics> {
        let (transport, warnings) = self.build_transport(cfg)?.into_parts();
        Ok(Validated {
            value: ClientHandle::new(transport),
            warnings,
        })
    }

    /// Build the concrete transport. Every failure becomes a diagnostic;
    /// URL and header problems are reported together.
    pub fn build_transport(
        &self,
        cfg: &ResolvedConfig,
    ) -> Result<Validated<HttpTransport>, Diagnostics> {
        let mut diags = Diagnostics::new();

        debug!(server_url = %cfg.server_url(), "initializing netbox client");

        let parsed = parse_server_url(cfg.server_url(), &mut diags);
        let headers = build_headers(cfg, &mut diags);

        let (Some((url, scheme)), Some(headers)) = (parsed, headers) else {
            return Err(diags);
        };
        if diags.has_error() {
            return Err(diags);
        }

        let mut base_url = url.clone();
        base_url.set_path(&format!(
            "{}{}/",
            url.path().trim_end_matches('/'),
            DEFAULT_BASE_PATH
        ));
        base_url.set_query(None);
        base_url.set_fragment(None);

        debug!(
            host = url.host_str().unwrap_or_default(),
            schemes = ?[scheme],
            base_path = base_url.path(),
            "initializing netbox api runtime client"
        );

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(cfg.request_timeout())
            .user_agent(USER_AGENT);
        if scheme == Scheme::Https {
            builder = builder.https_only(true);
        }
        if cfg.allow_insecure_https() {
            if scheme == Scheme::Http {
                diags.push(Diagnostic::warning(
                    DiagnosticKind::InsecureTransport,
                    keys::ALLOW_INSECURE_HTTPS,
                    "`allow_insecure_https` has no effect on an http server URL",
                    "The server URL uses plain http, so there is no certificate to verify.",
                ));
            } else {
                diags.push(Diagnostic::warning(
                    DiagnosticKind::InsecureTransport,
                    keys::ALLOW_INSECURE_HTTPS,
                    "TLS certificate verification is disabled",
                    "Any certificate presented by the server will be accepted. \
                     Only use this against test instances with self-signed certificates.",
                ));
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        let client = match builder.build() {
            Ok(client) => client,
            Err(e) => {
                diags.push(Diagnostic::error(
                    DiagnosticKind::TransportConstructionFailure,
                    keys::SERVER_URL,
                    "Unable to create the NetBox HTTP transport",
                    format!("The HTTP client could not be constructed: {e}"),
                ));
                return Err(diags);
            }
        };

        let transport = HttpTransport::new(
            client,
            base_url,
            scheme,
            cfg.request_timeout(),
            cfg.allow_insecure_https() && scheme == Scheme::Https,
            Arc::clone(&self.hook),
        );
        diags.finish(transport)
    }
}

/// Bootstrap with the default tracing hook.
pub fn bootstrap(cfg: &ResolvedConfig) -> Result<Validated<ClientHandle>, Diagnostics> {
    ClientBootstrapper::new().bootstrap(cfg)
}

fn parse_server_url(raw: &str, diags: &mut Diagnostics) -> Option<(Url, Scheme)> {
    let malformed = |detail: String| {
        Diagnostic::error(
            DiagnosticKind::MalformedUrl,
            keys::SERVER_URL,
            "Malformed NetBox Server URL",
            detail,
        )
    };

    // A bare `host[:port][/path]` means plain http.
    let url = if raw.contains("://") {
        Url::parse(raw)
    } else {
        diags.push(Diagnostic::warning(
            DiagnosticKind::NormalizationWarning,
            keys::SERVER_URL,
            "No scheme in the `server_url` parameter, assuming http",
            format!(
                "'{raw}' was read as 'http://{raw}'. Prefix the URL with https:// or http:// \
                 to choose the scheme explicitly and silence this warning."
            ),
        ));
        Url::parse(&format!("http://{raw}"))
    };
    let url = match url {
        Ok(url) => url,
        Err(e) => {
            diags.push(malformed(format!(
                "'{raw}' could not be parsed as a URL: {e}. Use a full URL such as https://netbox.example.com."
            )));
            return None;
        }
    };

    let Some(scheme) = Scheme::parse(url.scheme()) else {
        diags.push(malformed(format!(
            "'{raw}' uses the unsupported scheme '{}'. Only http and https are supported.",
            url.scheme()
        )));
        return None;
    };

    if url.host_str().is_none_or(str::is_empty) {
        diags.push(malformed(format!("'{raw}' has no host.")));
        return None;
    }

    Some((url, scheme))
}

fn build_headers(cfg: &ResolvedConfig, diags: &mut Diagnostics) -> Option<HeaderMap> {
    let mut headers = HeaderMap::new();
    let mut ok = true;

    match HeaderValue::from_str(&format!("Token {}", cfg.api_token().expose())) {
        Ok(mut value) => {
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Err(_) => {
            ok = false;
            diags.push(Diagnostic::error(
                DiagnosticKind::TransportConstructionFailure,
                keys::API_TOKEN,
                "Invalid NetBox API Token",
                "The API token contains characters that cannot be sent in an HTTP header.",
            ));
        }
    }

    for (name, value) in cfg.headers() {
        let field = FieldPath::root(keys::HEADERS).child(name);
        let header_name = match HeaderName::from_bytes(name.as_bytes()) {
            Ok(n) => n,
            Err(_) => {
                ok = false;
                diags.push(Diagnostic::error(
                    DiagnosticKind::TransportConstructionFailure,
                    field,
                    "Invalid header name",
                    format!("'{name}' is not a valid HTTP header name."),
                ));
                continue;
            }
        };
        match HeaderValue::from_str(value) {
            Ok(v) => {
                headers.insert(header_name, v);
            }
            Err(_) => {
                ok = false;
                diags.push(Diagnostic::error(
                    DiagnosticKind::TransportConstructionFailure,
                    field,
                    "Invalid header value",
                    format!("The value for '{name}' cannot be sent in an HTTP header."),
                ));
            }
        }
    }

    ok.then_some(headers)
}
