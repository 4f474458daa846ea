use serde::{Deserialize, Serialize};
use std::fmt;

/// Path to a configuration attribute, e.g. `server_url` or `headers.X-Request-Source`.
///
/// Diagnostics are tagged with a path so the host can point the user at the
/// offending attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// A top-level attribute.
    pub fn root(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// A nested key under this attribute (map entries, nested blocks).
    pub fn child(&self, key: impl AsRef<str>) -> Self {
        Self(format!("{}.{}", self.0, key.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the top-level attribute this path starts at.
    pub fn root_name(&self) -> &str {
        self.0.split('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(s: &str) -> Self {
        Self::root(s)
    }
}

/// A secret string (API tokens). `Debug` and `Display` never print the value.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the raw value. Call sites should be the ones that put it on the wire.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Secret(\"\")")
        } else {
            f.write_str("Secret(***)")
        }
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Secret {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
