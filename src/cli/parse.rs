//! CLI parse: clap types for arbor. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// arbor - tagged, categorized directories and collections of them
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(about = "Manage Treants and Groups: tag, categorize, group and flatten directories")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root searched for Treants (default: config or current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a Treant or Group (or reopen the one already there)
    New {
        /// Directory of the new Treant
        path: PathBuf,
        /// Create a Group instead of a plain Treant
        #[arg(long)]
        group: bool,
        /// Tag to add (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Category as KEY=VALUE (repeatable)
        #[arg(long = "category")]
        categories: Vec<String>,
    },
    /// List Treants whose name matches a glob
    Ls {
        /// Name or glob pattern
        #[arg(default_value = "*")]
        pattern: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
        /// Worker count for reading state (default: config)
        #[arg(long)]
        processes: Option<usize>,
    },
    /// Add or remove tags on matching Treants
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Set, remove or show categories on matching Treants
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Manage Group membership
    Group {
        #[command(subcommand)]
        command: GroupCommands,
    },
    /// Print the effective configuration as TOML
    Config,
    /// Partition matching Treants by category values
    Groupby {
        /// Name or glob pattern
        pattern: String,
        /// Category keys, in tuple order
        #[arg(required = true)]
        keys: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// Add tags
    Add {
        /// Name or glob pattern
        pattern: String,
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Remove tags
    Rm {
        /// Name or glob pattern
        pattern: String,
        #[arg(required = true)]
        tags: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Set categories given as KEY=VALUE
    Set {
        /// Name or glob pattern
        pattern: String,
        #[arg(required = true)]
        assignments: Vec<String>,
    },
    /// Remove category keys
    Rm {
        /// Name or glob pattern
        pattern: String,
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Show category values per Treant
    Show {
        /// Name or glob pattern
        pattern: String,
        /// Include keys missing on some Treants
        #[arg(long)]
        any: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// Add members to a Group
    Add {
        /// Name of the Group
        group: String,
        /// Member names or glob patterns
        #[arg(required = true)]
        members: Vec<String>,
    },
    /// Remove members from a Group
    Rm {
        /// Name of the Group
        group: String,
        /// Member names or glob patterns
        #[arg(required = true)]
        members: Vec<String>,
    },
    /// List the Treants a Group contains, nested Groups expanded
    Flatten {
        /// Name of the Group
        group: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
