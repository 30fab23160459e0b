//! Persistence layer for state files
//!
//! State is stored as pretty-printed JSON. Writes go to a temporary sibling
//! first and are renamed into place, so readers never observe a partial file.

use crate::error::TreantError;
use crate::store::TreantState;
use std::fs;
use std::path::Path;

/// Load and parse the state file at `path`.
pub fn load_state(path: &Path) -> Result<TreantState, TreantError> {
    let bytes = fs::read(path).map_err(|e| TreantError::store(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| TreantError::CorruptState {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Atomically replace the state file at `path`. Non-finite float categories
/// are rejected before anything is written.
pub fn save_state(path: &Path, state: &TreantState) -> Result<(), TreantError> {
    if let Some((key, value)) = state.categories.iter().find(|(_, v)| !v.is_finite()) {
        return Err(TreantError::InvalidArgument(format!(
            "category '{}' has non-finite value {}",
            key, value
        )));
    }

    let serialized = serde_json::to_vec_pretty(state).map_err(|e| TreantError::CorruptState {
        path: path.to_path_buf(),
        source: e,
    })?;

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, &serialized).map_err(|e| TreantError::store(&temp_path, e))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        TreantError::store(path, e)
    })
}

/// Write a fresh state file, creating parent directories. Fails if `path`
/// already exists.
pub fn create_state(path: &Path, state: &TreantState) -> Result<(), TreantError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| TreantError::store(parent, e))?;
    }
    if path.exists() {
        return Err(TreantError::store(
            path,
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "state file already exists"),
        ));
    }
    save_state(path, state)
}
