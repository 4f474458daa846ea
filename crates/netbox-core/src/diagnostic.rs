use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::NetboxError;
use crate::types::FieldPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks startup.
    Error,
    /// Informational; never blocks.
    Warning,
}

/// What went wrong, independent of the human-readable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A required attribute was absent, null, or empty after env fallback.
    MissingRequiredValue,
    /// The host has not computed the attribute yet.
    UnknownAtResolutionTime,
    /// A value was present but could not be accepted (bad timeout, bad header).
    InvalidValue,
    /// `server_url` could not be parsed into scheme, host and path.
    MalformedUrl,
    /// The HTTP transport could not be built from the resolved settings.
    TransportConstructionFailure,
    /// The input was rewritten (trailing slashes stripped).
    NormalizationWarning,
    /// TLS certificate verification was turned off.
    InsecureTransport,
}

/// A single problem found while configuring the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub field: FieldPath,
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub summary: String,
    pub detail: String,
}

impl Diagnostic {
    pub fn error(
        kind: DiagnosticKind,
        field: impl Into<FieldPath>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            severity: Severity::Error,
            kind,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn warning(
        kind: DiagnosticKind,
        field: impl Into<FieldPath>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            severity: Severity::Warning,
            kind,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.severity {
            Severity::Error => "❌",
            Severity::Warning => "⚠️ ",
        };
        write!(f, "{} {}: {}", icon, self.field, self.summary)?;
        if !self.detail.is_empty() {
            write!(f, "\n   ↳ {}", self.detail)?;
        }
        Ok(())
    }
}

/// Ordered, accumulating list of diagnostics.
///
/// Checks push into this instead of returning early; callers decide what to do
/// with the full list once every check has run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn has_error(&self) -> bool {
        self.0.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|d| d.severity == Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Diagnostics attached to `field` or any path nested under it.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.0.iter().filter(move |d| d.field.root_name() == field)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }

    /// Finish a validation pass: any error rejects `value`, otherwise the
    /// remaining warnings travel with it.
    pub fn finish<T>(self, value: T) -> std::result::Result<Validated<T>, Diagnostics> {
        if self.has_error() {
            Err(self)
        } else {
            Ok(Validated {
                value,
                warnings: self,
            })
        }
    }

    /// Collapse into a runtime error for callers that use `?` on [`crate::Result`].
    pub fn into_error(self) -> NetboxError {
        NetboxError::Rejected(self.error_count())
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(v: Vec<Diagnostic>) -> Self {
        Self(v)
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

/// A successfully validated value plus the non-fatal warnings raised on the way.
#[derive(Debug, Clone)]
pub struct Validated<T> {
    pub value: T,
    pub warnings: Diagnostics,
}

impl<T> Validated<T> {
    pub fn into_parts(self) -> (T, Diagnostics) {
        (self.value, self.warnings)
    }
}
