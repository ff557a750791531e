//! # Configuration
//!
//! Console configuration is a TOML document:
//!
//! ```toml
//! [service]
//! buffer_size = 32
//!
//! [[routes]]
//! path = "security"
//! redirect = "groups"
//!
//! [[routes]]
//! path = "security/groups"
//! panel = "groups"
//!
//! [[routes]]
//! path = "*"
//! ```
//!
//! Route entries keep their declaration order; see
//! [`RouteDecl`](crate::routing::RouteDecl) for the rules. Log verbosity is
//! not configured here but through `RUST_LOG` (see [`crate::telemetry`]).

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::routing::{RouteDecl, RouteError};

/// The settings table shipped with the console.
pub const DEFAULT_CONFIG: &str = include_str!("../config/settings_routes.toml");

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Cannot read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    Parse(String),

    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Settings of the in-process resource service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_buffer_size() -> usize {
    32
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            buffer_size: default_buffer_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub routes: Vec<RouteDecl>,
}

impl ConsoleConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// The configuration embedded in the binary.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::from_toml_str(DEFAULT_CONFIG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_parses() {
        let config = ConsoleConfig::builtin().unwrap();
        assert_eq!(config.service.buffer_size, 32);
        assert_eq!(config.routes.first().unwrap().redirect.as_deref(), Some("parameters"));
        assert_eq!(config.routes.last().unwrap().path, "*");
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = ConsoleConfig::from_toml_str("").unwrap();
        assert_eq!(config.service, ServiceConfig::default());
        assert!(config.routes.is_empty());
    }

    #[test]
    fn malformed_input_is_a_parse_error() {
        let result = ConsoleConfig::from_toml_str("[[routes]]\npath = 3\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = ConsoleConfig::load("/definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
