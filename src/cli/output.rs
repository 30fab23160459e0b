//! CLI output: error mapping from domain errors to the CLI surface.

use crate::error::TreantError;

/// Map domain errors to a message for stderr.
pub fn map_error(e: &TreantError) -> String {
    format!("error: {}", e)
}
