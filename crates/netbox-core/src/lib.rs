//! # netbox-core
//!
//! Core types, diagnostics, and errors for the NetBox provider.
//! This crate defines the shared vocabulary used by every other crate in the workspace.

pub mod diagnostic;
pub mod error;
pub mod types;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Severity, Validated};
pub use error::{NetboxError, Result};
pub use types::*;
