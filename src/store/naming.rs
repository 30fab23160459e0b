//! State file naming: `<treanttype>.<uuid>.json`
//!
//! The uuid and type of a Treant live in its state file name so Treants can be
//! found by a directory scan without opening any file.

use crate::error::TreantError;
use std::fs;
use std::path::{Path, PathBuf};

/// Extension of every state file
pub const STATEFILE_EXT: &str = "json";

pub fn statefile_name(treanttype: &str, uuid: &str) -> String {
    format!("{}.{}.{}", treanttype, uuid, STATEFILE_EXT)
}

/// Split a state file path into `(treanttype, uuid)`.
///
/// Returns `None` unless the file name has exactly three dot-separated parts,
/// the last being the state file extension and the middle a valid uuid.
pub fn parse_statefile_name(path: &Path) -> Option<(String, String)> {
    let file_name = path.file_name()?.to_str()?;
    let mut parts = file_name.split('.');
    let treanttype = parts.next()?;
    let uuid = parts.next()?;
    let ext = parts.next()?;
    if parts.next().is_some() || ext != STATEFILE_EXT || treanttype.is_empty() {
        return None;
    }
    uuid::Uuid::parse_str(uuid).ok()?;
    Some((treanttype.to_string(), uuid.to_string()))
}

/// State files directly inside `dir`, sorted by path.
pub fn statefiles_in(dir: &Path) -> Result<Vec<PathBuf>, TreantError> {
    let entries = fs::read_dir(dir).map_err(|e| TreantError::store(dir, e))?;

    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| TreantError::store(dir, e))?;
        let path = entry.path();
        if path.is_file() && parse_statefile_name(&path).is_some() {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}
