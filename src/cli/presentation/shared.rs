//! Shared presentation helpers.

use crate::category::CategoryValue;
use comfy_table::{presets, Table};

/// One-line outcome of a mutating command.
pub fn format_summary(action: &str, count: usize) -> String {
    let noun = if count == 1 { "Treant" } else { "Treants" };
    format!("{} {} {}", action, count, noun)
}

pub(crate) fn new_table<S: ToString>(header: Vec<S>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.set_header(header.into_iter().map(|h| h.to_string()).collect::<Vec<_>>());
    table
}

pub(crate) fn cell(value: Option<&CategoryValue>) -> String {
    value.map(ToString::to_string).unwrap_or_else(|| "-".to_string())
}
