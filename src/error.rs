//! Error types for Treants, their stores and collections of them.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by Treant, store and collection operations
#[derive(Debug, Error)]
pub enum TreantError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Multiple Treants ({count}) found in {path:?}; give the path to a specific state file")]
    AmbiguousMember { path: PathBuf, count: usize },

    #[error("No Treant found at {0:?}")]
    MemberNotFound(PathBuf),

    #[error("State file unavailable at {path:?}: {source}")]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt state file at {path:?}: {source}")]
    CorruptState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No constructor registered for treant type '{0}'")]
    UnknownTreantType(String),

    #[error("Not a state file name (expected <type>.<uuid>.json): {0:?}")]
    InvalidStateFile(PathBuf),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TreantError {
    pub(crate) fn store(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TreantError::StoreUnavailable {
            path: path.into(),
            source,
        }
    }

    /// True for failures of the underlying state file itself.
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, TreantError::StoreUnavailable { .. })
    }
}

impl From<config::ConfigError> for TreantError {
    fn from(err: config::ConfigError) -> Self {
        TreantError::Config(err.to_string())
    }
}

impl From<globset::Error> for TreantError {
    fn from(err: globset::Error) -> Self {
        TreantError::InvalidArgument(format!("Invalid glob pattern: {}", err))
    }
}
