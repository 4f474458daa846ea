use netbox_client::{ClientBootstrapper, ClientHandle};
use netbox_config::{ConfigResolver, EnvironmentOverrides, RawConfig};
use netbox_core::{Diagnostics, NetboxError, Result};
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::schema::{ProviderSchema, provider_schema};

pub const TYPE_NAME: &str = "netbox";

/// Outcome of [`NetboxProvider::configure`].
#[derive(Debug)]
pub struct ConfigureResponse {
    /// Warnings and errors from both stages, in the order they were raised.
    pub diagnostics: Diagnostics,
    /// Present exactly when `diagnostics` holds no error.
    pub client: Option<ClientHandle>,
}

impl ConfigureResponse {
    pub fn has_error(&self) -> bool {
        self.diagnostics.has_error()
    }
}

/// The NetBox provider.
///
/// Holds the configured client for the lifetime of the plugin session and
/// shares it with resources and data sources.
pub struct NetboxProvider {
    bootstrapper: ClientBootstrapper,
    client: RwLock<Option<ClientHandle>>,
}

impl Default for NetboxProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl NetboxProvider {
    pub fn new() -> Self {
        Self::with_bootstrapper(ClientBootstrapper::new())
    }

    pub fn with_bootstrapper(bootstrapper: ClientBootstrapper) -> Self {
        Self {
            bootstrapper,
            client: RwLock::new(None),
        }
    }

    pub fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    pub fn schema(&self) -> ProviderSchema {
        provider_schema(TYPE_NAME)
    }

    /// Resolve `raw` against `env`, then bootstrap the API client.
    ///
    /// Bootstrap only runs when resolution produced no error. Warnings from
    /// both stages are kept. A failed configure drops any previously stored
    /// client.
    pub fn configure(&self, raw: &RawConfig, env: EnvironmentOverrides) -> ConfigureResponse {
        let resolver = ConfigResolver::new(env);
        let mut diagnostics = Diagnostics::new();

        let resolved = match resolver.resolve(raw) {
            Ok(resolved) => resolved,
            Err(errors) => {
                warn!(errors = errors.error_count(), "netbox provider configuration rejected");
                *self.client.write() = None;
                return ConfigureResponse {
                    diagnostics: errors,
                    client: None,
                };
            }
        };
        let (config, warnings) = resolved.into_parts();
        diagnostics.extend(warnings);

        let client = match self.bootstrapper.bootstrap(&config) {
            Ok(bootstrapped) => {
                let (client, warnings) = bootstrapped.into_parts();
                diagnostics.extend(warnings);
                client
            }
            Err(errors) => {
                warn!(errors = errors.error_count(), "netbox client bootstrap failed");
                *self.client.write() = None;
                diagnostics.extend(errors);
                return ConfigureResponse {
                    diagnostics,
                    client: None,
                };
            }
        };

        for w in diagnostics.warnings() {
            warn!("{}", w);
        }
        info!(base_url = %client.base_url(), "netbox provider configured");

        *self.client.write() = Some(client.clone());
        ConfigureResponse {
            diagnostics,
            client: Some(client),
        }
    }

    /// Client handed to resources. Errors until `configure` has succeeded.
    pub fn resource_data(&self) -> Result<ClientHandle> {
        self.client.read().clone().ok_or(NetboxError::NotConfigured)
    }

    /// Client handed to data sources; same handle as [`Self::resource_data`].
    pub fn data_source_data(&self) -> Result<ClientHandle> {
        self.resource_data()
    }

    /// Resource type names served by this provider.
    pub fn resources(&self) -> &'static [&'static str] {
        &[]
    }

    /// Data source type names served by this provider.
    pub fn data_sources(&self) -> &'static [&'static str] {
        &[]
    }
}
