//! # netbox-cli
//!
//! Command-line interface for the NetBox provider configuration.
//!
//! ## Commands
//!
//! - `netbox check` — Resolve and validate the configuration, build the client
//! - `netbox status` — Configure, then query the NetBox status endpoint
//! - `netbox schema` — Print the provider configuration schema
//! - `netbox version` — Show version and build info
//! - `netbox completions` — Generate shell completions

pub mod commands;

pub use commands::Cli;
