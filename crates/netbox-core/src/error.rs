use thiserror::Error;

/// Unified error type for runtime failures after the provider is configured.
///
/// Configuration problems are reported through [`crate::Diagnostics`] instead,
/// so that every problem surfaces in a single pass.
#[derive(Error, Debug)]
pub enum NetboxError {
    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    #[error("configuration rejected with {0} error(s)")]
    Rejected(usize),

    // ── API errors ─────────────────────────────────────────────
    #[error("netbox api returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("scheme '{scheme}' not allowed, transport accepts: {allowed}")]
    SchemeNotAllowed { scheme: String, allowed: String },

    #[error("invalid request path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("provider not configured")]
    NotConfigured,

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("url error: {0}")]
    Url(#[from] url::ParseError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, NetboxError>;
