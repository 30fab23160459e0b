//! Command-name contract for logging.

use crate::cli::parse::{CategoryCommands, Commands, GroupCommands, TagCommands};

/// Dotted command name (e.g. "tag.add", "group.flatten").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::New { .. } => "new".to_string(),
        Commands::Ls { .. } => "ls".to_string(),
        Commands::Tag { command } => format!("tag.{}", tag_command_name(command)),
        Commands::Category { command } => format!("category.{}", category_command_name(command)),
        Commands::Group { command } => format!("group.{}", group_command_name(command)),
        Commands::Config => "config".to_string(),
        Commands::Groupby { .. } => "groupby".to_string(),
    }
}

fn tag_command_name(command: &TagCommands) -> &'static str {
    match command {
        TagCommands::Add { .. } => "add",
        TagCommands::Rm { .. } => "rm",
    }
}

fn category_command_name(command: &CategoryCommands) -> &'static str {
    match command {
        CategoryCommands::Set { .. } => "set",
        CategoryCommands::Rm { .. } => "rm",
        CategoryCommands::Show { .. } => "show",
    }
}

fn group_command_name(command: &GroupCommands) -> &'static str {
    match command {
        GroupCommands::Add { .. } => "add",
        GroupCommands::Rm { .. } => "rm",
        GroupCommands::Flatten { .. } => "flatten",
    }
}
