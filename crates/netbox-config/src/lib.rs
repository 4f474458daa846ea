//! # netbox-config
//!
//! Configuration system for the NetBox provider. Each attribute is taken from the
//! explicit configuration, then from its `NETBOX_*` environment variable, then from
//! a built-in default — in that precedence order.
//!
//! Resolution never stops at the first problem: every check runs and all
//! diagnostics are returned together.

pub mod env;
pub mod loader;
pub mod raw;
pub mod resolver;
pub mod value;

pub use env::EnvironmentOverrides;
pub use loader::ConfigLoader;
pub use raw::RawConfig;
pub use resolver::{ConfigResolver, ResolvedConfig, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use value::ConfigValue;
