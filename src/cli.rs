//! CLI domain: parse, route, help, output, and presentation only.
//! No domain logic; the route table dispatches to the library.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{CategoryCommands, Cli, Commands, GroupCommands, TagCommands};
pub use presentation::{
    format_category_table, format_groupby, format_member_rows, format_summary, MemberRow,
};
pub use route::RunContext;
