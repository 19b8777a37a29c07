use thiserror::Error;

use crate::api::LookupError;
use crate::config::ConfigError;

/// Errors raised while setting up the widget
#[derive(Debug, Error)]
pub enum AutocompleteError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to create API client: {0}")]
    Client(#[from] LookupError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
