//! # netbox-client
//!
//! Turns a resolved provider configuration into a ready-to-use NetBox API client.
//! The client is exposed as the [`ApiClient`] capability behind a cheap-to-clone
//! [`ClientHandle`], so downstream resource code never sees the HTTP library.

pub mod bootstrap;
pub mod client;
pub mod hook;
pub mod mock;
pub mod transport;

pub use bootstrap::{ClientBootstrapper, DEFAULT_BASE_PATH, bootstrap};
pub use client::{ApiClient, ClientHandle, Scheme};
pub use hook::{TracingHook, TransportHook};
pub use mock::MockClient;
pub use transport::HttpTransport;
