//! CLI route: single route table and run context. Dispatches to the library and presentation.

use crate::category::CategoryValue;
use crate::cli::parse::{CategoryCommands, Commands, GroupCommands, TagCommands};
use crate::cli::presentation::{
    format_category_table, format_groupby, format_member_rows, format_summary, MemberRow,
};
use crate::collection::Collection;
use crate::config::{ArborConfig, ConfigLoader};
use crate::error::TreantError;
use crate::treant::{Group, Member, Treant, TreantInit};
use crate::workspace::Workspace;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Runtime context for CLI execution: loaded configuration and the workspace.
pub struct RunContext {
    config: ArborConfig,
    workspace: Arc<Workspace>,
}

impl RunContext {
    /// Load configuration and open the workspace.
    ///
    /// The root is `root` if given, else the configured `workspace_root`,
    /// else the current directory.
    pub fn new(root: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<Self, TreantError> {
        let config = match (&config_path, &root) {
            (Some(path), _) => ConfigLoader::load_from_file(path)?,
            (None, Some(root)) => ConfigLoader::load(root)?,
            (None, None) => ConfigLoader::load(Path::new("."))?,
        };

        config.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            TreantError::Config(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })?;

        let root = root.unwrap_or_else(|| config.resolved_root());
        let workspace = Arc::new(Workspace::from_config(&root, &config));
        debug!(root = %workspace.root().display(), "Workspace opened");

        Ok(Self { config, workspace })
    }

    pub fn workspace(&self) -> &Arc<Workspace> {
        &self.workspace
    }

    pub fn config(&self) -> &ArborConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, TreantError> {
        match command {
            Commands::New {
                path,
                group,
                tags,
                categories,
            } => self.handle_new(path, *group, tags, categories),
            Commands::Ls {
                pattern,
                format,
                processes,
            } => self.handle_ls(pattern, format, *processes),
            Commands::Tag { command } => self.handle_tag_command(command),
            Commands::Category { command } => self.handle_category_command(command),
            Commands::Group { command } => self.handle_group_command(command),
            Commands::Config => self.config.to_toml(),
            Commands::Groupby {
                pattern,
                keys,
                format,
            } => {
                let matched = self.matching(pattern)?;
                let groups = matched.categories().groupby_keys(keys)?;
                format_groupby(keys, &groups, format)
            }
        }
    }

    fn matching(&self, pattern: &str) -> Result<Collection, TreantError> {
        let mut collection = self.workspace.bundle();
        collection.add(pattern)?;
        Ok(collection)
    }

    fn handle_new(
        &self,
        path: &Path,
        group: bool,
        tags: &[String],
        categories: &[String],
    ) -> Result<String, TreantError> {
        let mut init = TreantInit::default();
        for tag in tags {
            init = init.tag(tag.clone());
        }
        for assignment in categories {
            let (key, value) = parse_assignment(assignment)?;
            init = init.category(key, value);
        }

        let dir = self.workspace.root().join(path);
        let member: Member = if group {
            Group::init_in(&dir, init, Arc::clone(&self.workspace))?.into()
        } else {
            Treant::init(&dir, init)?.into()
        };
        info!(name = member.name(), uuid = member.uuid(), "Treant ready");
        Ok(format!("{} at {}", member, member.path().display()))
    }

    fn handle_ls(
        &self,
        pattern: &str,
        format: &str,
        processes: Option<usize>,
    ) -> Result<String, TreantError> {
        let matched = self.matching(pattern)?;
        let processes = processes.unwrap_or(self.config.map.default_processes);
        let rows = matched
            .map(|member| Some(MemberRow::read(member)), processes)?
            .unwrap_or_default()
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        format_member_rows(&rows, format)
    }

    fn handle_tag_command(&self, command: &TagCommands) -> Result<String, TreantError> {
        match command {
            TagCommands::Add { pattern, tags } => {
                let matched = self.matching(pattern)?;
                matched.tags().add(tags.iter().cloned())?;
                Ok(format_summary("Tagged", matched.len()))
            }
            TagCommands::Rm { pattern, tags } => {
                let matched = self.matching(pattern)?;
                matched.tags().remove(tags)?;
                Ok(format_summary("Untagged", matched.len()))
            }
        }
    }

    fn handle_category_command(&self, command: &CategoryCommands) -> Result<String, TreantError> {
        match command {
            CategoryCommands::Set {
                pattern,
                assignments,
            } => {
                let pairs = assignments
                    .iter()
                    .map(|a| parse_assignment(a))
                    .collect::<Result<Vec<_>, _>>()?;
                let matched = self.matching(pattern)?;
                matched.categories().add(pairs)?;
                Ok(format_summary("Categorized", matched.len()))
            }
            CategoryCommands::Rm { pattern, keys } => {
                let matched = self.matching(pattern)?;
                matched.categories().remove(keys)?;
                Ok(format_summary("Updated", matched.len()))
            }
            CategoryCommands::Show {
                pattern,
                any,
                format,
            } => {
                let matched = self.matching(pattern)?;
                let categories = matched.categories();
                let columns: BTreeMap<String, Vec<Option<CategoryValue>>> = if *any {
                    categories.any()?
                } else {
                    categories
                        .all()?
                        .into_iter()
                        .map(|(k, values)| (k, values.into_iter().map(Some).collect()))
                        .collect()
                };
                format_category_table(&matched.names(), &columns, format)
            }
        }
    }

    fn handle_group_command(&self, command: &GroupCommands) -> Result<String, TreantError> {
        match command {
            GroupCommands::Add { group, members } => {
                let mut collection = self.find_group(group)?.members()?;
                let before = collection.len();
                collection.add(members.clone())?;
                Ok(format_summary("Added", collection.len() - before))
            }
            GroupCommands::Rm { group, members } => {
                let mut collection = self.find_group(group)?.members()?;
                let before = collection.len();
                collection.remove(members.clone())?;
                Ok(format_summary("Removed", before - collection.len()))
            }
            GroupCommands::Flatten { group, format } => {
                let flattened = self.find_group(group)?.members()?.flatten()?;
                let rows = flattened
                    .iter()
                    .map(MemberRow::read)
                    .collect::<Result<Vec<_>, _>>()?;
                format_member_rows(&rows, format)
            }
        }
    }

    /// The single Group named `name` in the workspace.
    fn find_group(&self, name: &str) -> Result<Group, TreantError> {
        let mut groups: Vec<Group> = self
            .workspace
            .discover(name)?
            .into_iter()
            .filter_map(|m| match m {
                Member::Group(g) => Some(g),
                Member::Treant(_) => None,
            })
            .collect();

        match groups.len() {
            0 => Err(TreantError::MemberNotFound(self.workspace.root().join(name))),
            1 => Ok(groups.remove(0)),
            count => Err(TreantError::AmbiguousMember {
                path: self.workspace.root().join(name),
                count,
            }),
        }
    }
}

/// Parse `KEY=VALUE` into a category key and typed value.
fn parse_assignment(assignment: &str) -> Result<(String, CategoryValue), TreantError> {
    let (key, value) = assignment.split_once('=').ok_or_else(|| {
        TreantError::InvalidArgument(format!("Expected KEY=VALUE, got '{}'", assignment))
    })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(TreantError::InvalidArgument(format!(
            "Empty category key in '{}'",
            assignment
        )));
    }
    let value = match value.parse::<CategoryValue>() {
        Ok(value) => value,
        Err(never) => match never {},
    };
    Ok((key.to_string(), value))
}
