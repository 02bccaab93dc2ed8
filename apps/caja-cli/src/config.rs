//! # Till Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --store-name, --inventory                                          │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     CAJA_STORE_NAME, CAJA_INVENTORY, CAJA_LOG                          │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, or caja.toml in the platform config dir             │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     store "Caja", built-in inventory, log filter "warn"                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Bodega Central"
//! inventory_path = "inventario.csv"
//!
//! [logging]
//! filter = "warn,caja_core=debug"
//! ```
//!
//! `RUST_LOG`, when set, still wins over `logging.filter`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CliError, CliResult};
use crate::Args;

/// Store identity and seed inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    /// Shown in the session banner.
    pub name: String,

    /// CSV to seed the catalog from. `None` uses the built-in inventory.
    pub inventory_path: Option<PathBuf>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            name: "Caja".to_string(),
            inventory_path: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

/// Complete till configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub store: StoreSettings,
    pub logging: LoggingSettings,
}

impl CliConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` must exist; the platform default path is
    /// optional.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::MissingFile(path.display().to_string()));
                }
                Self::from_file(&path)?
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &std::path::Path) -> CliResult<Self> {
        info!(?path, "Loading till config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `CAJA_*` environment variables.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("CAJA_STORE_NAME") {
            debug!(store = %name, "Overriding store name from environment");
            self.store.name = name;
        }

        if let Some(path) = lookup("CAJA_INVENTORY") {
            debug!(path = %path, "Overriding inventory path from environment");
            self.store.inventory_path = Some(PathBuf::from(path));
        }

        if let Some(filter) = lookup("CAJA_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Applies command-line flags, the highest-priority source.
    pub fn apply_args(&mut self, args: &Args) -> CliResult<()> {
        if let Some(name) = &args.store_name {
            self.store.name = name.clone();
        }
        if let Some(path) = &args.inventory {
            self.store.inventory_path = Some(path.clone());
        }
        self.validate()
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(CliError::InvalidConfig(
                "store.name no puede estar vacío".into(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(CliError::InvalidConfig(
                "logging.filter no puede estar vacío".into(),
            ));
        }

        Ok(())
    }

    /// `caja.toml` in the platform config directory.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("pe", "caja", "caja")
            .map(|dirs| dirs.config_dir().join("caja.toml"))
    }
}
