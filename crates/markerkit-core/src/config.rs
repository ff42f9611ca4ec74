//! TOML configuration for markerkit.
//!
//! ```toml
//! [resolver]
//! markers = [".git", "README.md"]
//!
//! [table]
//! symbol_column = "symbol"
//!
//! [aliases]
//! "SDC1/CD138" = "SDC1"
//! ```
//!
//! Lookup order for [`Config::load`]: an explicit path, then
//! `$MARKERKIT_CONFIG`, then `<user config dir>/markerkit/config.toml`.
//! Only an explicit path is required to exist.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::paths::expand_tilde;
use crate::util::resolver::{DEFAULT_MARKERS, RootResolver};

/// Project name used for the config directory and environment variables.
pub const PROJECT_NAME: &str = "markerkit";

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "MARKERKIT_CONFIG";

/// Environment variable naming the project root, honored by the CLI.
pub const ROOT_ENV: &str = "MARKERKIT_ROOT";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root discovery settings.
    pub resolver: ResolverConfig,
    /// Feature table column names.
    pub table: TableConfig,
    /// Extra alias → canonical symbol entries, layered on the built-ins.
    pub aliases: BTreeMap<String, String>,
}

/// `[resolver]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Entries marking the project root.
    pub markers: Vec<String>,
    /// Directory at which the upward search stops.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ceiling: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            markers: DEFAULT_MARKERS.iter().map(|s| (*s).to_string()).collect(),
            ceiling: None,
        }
    }
}

/// `[table]` section: how feature tables are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Name of the symbol annotation column.
    pub symbol_column: String,
    /// Name of the row identifier column; the first column when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_column: Option<String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            symbol_column: "symbol".to_string(),
            index_column: None,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// # Errors
    ///
    /// Fails if an explicit `path` does not exist, or if the chosen file
    /// cannot be read or parsed.
    pub fn load(path: Option<&str>) -> Result<Self> {
        if let Some(path) = path {
            let path = expand_tilde(path);
            if !path.exists() {
                return Err(Error::config(format!(
                    "Config file does not exist: {}",
                    path.display()
                )));
            }
            return Self::from_file(&path);
        }

        match Self::resolve_config_path(None) {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse config from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// The config path that `load` would read.
    pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(expand_tilde(path));
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(expand_tilde(&path));
        }
        Self::default_config_path()
    }

    /// `<user config dir>/markerkit/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(PROJECT_NAME).join("config.toml"))
    }

    /// Build a resolver from the `[resolver]` section.
    ///
    /// The resolver honors [`ROOT_ENV`] in `resolve_root`.
    pub fn resolver(&self) -> RootResolver {
        let mut resolver = RootResolver::new()
            .with_markers(&self.resolver.markers)
            .with_env_override(ROOT_ENV);
        if let Some(ceiling) = &self.resolver.ceiling {
            resolver = resolver.with_ceiling(expand_tilde(ceiling));
        }
        resolver
    }
}
