//! Category tables (category show, groupby).

use super::shared::{cell, new_table};
use crate::category::CategoryValue;
use crate::collection::Collection;
use crate::error::TreantError;
use serde_json::json;
use std::collections::BTreeMap;

/// Keys down, members across; "-" where a member lacks a key.
pub fn format_category_table(
    names: &[String],
    columns: &BTreeMap<String, Vec<Option<CategoryValue>>>,
    format: &str,
) -> Result<String, TreantError> {
    if format == "json" {
        return Ok(serde_json::to_string_pretty(&json!({
            "members": names,
            "categories": columns,
        }))?);
    }
    if columns.is_empty() {
        return Ok("No categories.".to_string());
    }

    let mut header = vec!["Key".to_string()];
    header.extend(names.iter().cloned());
    let mut table = new_table(header);
    for (key, values) in columns {
        let mut row = vec![key.clone()];
        row.extend(values.iter().map(|v| cell(v.as_ref())));
        table.add_row(row);
    }
    Ok(table.to_string())
}

pub fn format_groupby(
    keys: &[String],
    groups: &BTreeMap<Vec<CategoryValue>, Collection>,
    format: &str,
) -> Result<String, TreantError> {
    if format == "json" {
        let arr: Vec<serde_json::Value> = groups
            .iter()
            .map(|(values, members)| json!({ "values": values, "members": members.names() }))
            .collect();
        return Ok(serde_json::to_string_pretty(&json!({ "keys": keys, "groups": arr }))?);
    }
    if groups.is_empty() {
        return Ok(format!("No Treants have all of: {}", keys.join(", ")));
    }

    let mut header = keys.to_vec();
    header.push("Members".to_string());
    let mut table = new_table(header);
    for (values, members) in groups {
        let mut row: Vec<String> = values.iter().map(ToString::to_string).collect();
        row.push(members.names().join(", "));
        table.add_row(row);
    }
    Ok(table.to_string())
}
