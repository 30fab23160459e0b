//! CLI presentation: text and json formatters per command family.

mod categories;
mod members;
mod shared;

pub use categories::{format_category_table, format_groupby};
pub use members::{format_member_rows, MemberRow};
pub use shared::format_summary;
