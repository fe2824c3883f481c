//! Configuration loader

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{ConfigError, SieveError};

use super::{CompilerConfig, OutputConfig, SourcesConfig};

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILENAME: &str = ".diagsieve.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Attribute prefix for rules (`ts` reads `ts`, `ts2322`, ...)
    #[serde(default = "default_attr_prefix")]
    pub attr_prefix: String,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Compiler configuration
    #[serde(default)]
    pub compiler: CompilerConfig,

    /// Source discovery configuration
    #[serde(default)]
    pub sources: SourcesConfig,
}

fn default_attr_prefix() -> String {
    "ts".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            attr_prefix: default_attr_prefix(),
            output: OutputConfig::default(),
            compiler: CompilerConfig::default(),
            sources: SourcesConfig::default(),
        }
    }
}

impl Config {
    /// Load `.diagsieve.toml` from `dir`, or return the default
    pub fn load_or_default(dir: &Path) -> Result<Self, SieveError> {
        let config_path = dir.join(CONFIG_FILENAME);

        if config_path.exists() {
            Self::load_from_file(&config_path)
        } else {
            debug!(dir = %dir.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, SieveError> {
        let content = fs::read_to_string(path).map_err(|e| {
            SieveError::Config(ConfigError::FileRead {
                path: path.display().to_string(),
                source: e,
            })
        })?;

        debug!(path = %path.display(), "Loading config");
        toml::from_str(&content).map_err(Into::into)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, SieveError> {
        toml::to_string_pretty(self).map_err(Into::into)
    }
}
