use netbox_core::{NetboxError, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::raw::RawConfig;

/// Loads the raw provider configuration the operator CLI feeds to the resolver.
///
/// The file only supplies explicit values; environment fallbacks and defaults
/// are applied later by [`crate::ConfigResolver`].
pub struct ConfigLoader {
    raw: RawConfig,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > NETBOX_CONFIG env > ~/.netbox/netbox.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("NETBOX_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".netbox")
            .join("netbox.toml")
    }

    /// Load the config from disk. A missing file yields an empty config so the
    /// environment can still supply every value.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = Self::resolve_path(path);
        let raw = if config_path.exists() {
            info!(?config_path, "loading provider configuration");
            let contents = std::fs::read_to_string(&config_path)?;
            Self::parse(&config_path, &contents)?
        } else {
            warn!(?config_path, "config file not found, relying on environment");
            RawConfig::default()
        };

        Ok(Self { raw, config_path })
    }

    /// Parse file contents; `.json` files are read as JSON, everything else as TOML.
    pub fn parse(path: &Path, contents: &str) -> Result<RawConfig> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str::<RawConfig>(contents).map_err(|e| {
                NetboxError::Config(format!("failed to parse {}: {}", path.display(), e))
            })
        } else {
            toml::from_str::<RawConfig>(contents).map_err(|e| {
                NetboxError::Config(format!("failed to parse {}: {}", path.display(), e))
            })
        }
    }

    pub fn raw(&self) -> &RawConfig {
        &self.raw
    }

    pub fn into_raw(self) -> RawConfig {
        self.raw
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }
}
