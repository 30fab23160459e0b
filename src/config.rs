//! Configuration System
//!
//! Layered configuration: built-in defaults, the user's global file, the
//! workspace file and `ARBOR__*` environment variables, in increasing
//! precedence. Tests included.

use crate::error::TreantError;
use crate::logging::LoggingConfig;
use crate::workspace::DiscoveryConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[cfg(test)]
use std::sync::Mutex;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArborConfig {
    /// Workspace root path (defaults to current directory)
    pub workspace_root: Option<PathBuf>,

    /// Treant discovery walk settings
    #[serde(default)]
    pub discovery: DiscoveryConfig,

    /// Defaults for `Collection::map` driven from the command line
    #[serde(default)]
    pub map: MapConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Map worker settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Worker count; 1 runs in the calling thread
    #[serde(default = "default_processes")]
    pub default_processes: usize,
}

fn default_processes() -> usize {
    1
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_processes: default_processes(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Discovery(String),
    Map(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Discovery(msg) => write!(f, "Discovery: {}", msg),
            ValidationError::Map(msg) => write!(f, "Map: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ArborConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.map.default_processes == 0 {
            errors.push(ValidationError::Map(
                "default_processes must be at least 1".to_string(),
            ));
        }

        if self.discovery.max_depth == Some(0) {
            errors.push(ValidationError::Discovery(
                "max_depth of 0 would never reach a Treant".to_string(),
            ));
        }

        for pattern in &self.discovery.ignore_patterns {
            if pattern.trim().is_empty() {
                errors.push(ValidationError::Discovery(
                    "ignore patterns cannot be empty".to_string(),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Render the configuration as a TOML document loadable by `ConfigLoader`.
    pub fn to_toml(&self) -> Result<String, TreantError> {
        toml::to_string_pretty(self)
            .map_err(|e| TreantError::Config(format!("Failed to serialize configuration: {}", e)))
    }

    /// Workspace root to use when none is given on the command line.
    pub fn resolved_root(&self) -> PathBuf {
        self.workspace_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
