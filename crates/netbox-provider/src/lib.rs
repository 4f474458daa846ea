//! # netbox-provider
//!
//! The plugin-facing side of the NetBox provider. `configure` runs the two
//! startup stages in order and hands the resulting client to resource code:
//!
//! ```text
//!   RawConfig ──► ConfigResolver ──► ResolvedConfig ──► ClientBootstrapper ──► ClientHandle
//!        ▲              │                                      │                    │
//!   env snapshot        └──────────── Diagnostics ◄────────────┘                    ▼
//!                                                                        resources / data sources
//! ```

pub mod provider;
pub mod schema;

pub use provider::{ConfigureResponse, NetboxProvider, TYPE_NAME};
pub use schema::{AttributeSchema, AttributeType, ProviderSchema};
