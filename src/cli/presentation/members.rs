//! Member listings (ls, group flatten).

use super::shared::new_table;
use crate::error::TreantError;
use crate::treant::Member;
use serde::Serialize;
use std::path::PathBuf;

/// One listed member, as read from its state file.
#[derive(Debug, Clone, Serialize)]
pub struct MemberRow {
    pub name: String,
    pub treanttype: String,
    pub uuid: String,
    pub tags: Vec<String>,
    pub path: PathBuf,
}

impl MemberRow {
    pub fn read(member: &Member) -> Result<Self, TreantError> {
        Ok(Self {
            name: member.name().to_string(),
            treanttype: member.treanttype().to_string(),
            uuid: member.uuid().to_string(),
            tags: member.tags().all()?.into_iter().collect(),
            path: member.path().to_path_buf(),
        })
    }
}

pub fn format_member_rows(rows: &[MemberRow], format: &str) -> Result<String, TreantError> {
    if format == "json" {
        return Ok(serde_json::to_string_pretty(rows)?);
    }
    if rows.is_empty() {
        return Ok("No Treants found.".to_string());
    }

    let mut table = new_table(vec!["Name", "Type", "UUID", "Tags", "Path"]);
    for row in rows {
        table.add_row(vec![
            row.name.clone(),
            row.treanttype.clone(),
            row.uuid.clone(),
            row.tags.join(", "),
            row.path.display().to_string(),
        ]);
    }
    Ok(table.to_string())
}
