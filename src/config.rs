//! Widget configuration loading and validation

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::address::is_address_attribute;

mod types;

pub use types::{ControllerOptions, Selectors};

const CONFIG_DIR: &str = "idpc-autocomplete";
const CONFIG_FILE: &str = "config.toml";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(String),

    #[error("Unknown address attribute in output_fields: {0}")]
    UnknownAttribute(String),

    #[error("No API key configured. Set api_key in the config file or pass --api-key")]
    MissingApiKey,
}

/// Default config file location, `~/.config/idpc-autocomplete/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load configuration
///
/// An explicit path must exist. Without one the default location is used,
/// and a missing default file yields the default options.
pub fn load_config(path: Option<&Path>) -> Result<ControllerOptions, ConfigError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match config_path() {
            Some(path) if path.exists() => path,
            _ => {
                log::debug!("No config file found, using defaults");
                return Ok(ControllerOptions::default());
            }
        },
    };

    let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    log::debug!("Loaded config from {}", path.display());
    parse_config(&contents)
}

pub fn parse_config(content: &str) -> Result<ControllerOptions, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse(e.message().to_string()))
}

impl ControllerOptions {
    /// Check the options are usable for a live widget
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if let Some(name) = self
            .output_fields
            .keys()
            .find(|name| !is_address_attribute(name))
        {
            return Err(ConfigError::UnknownAttribute(name.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
