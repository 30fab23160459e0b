//! arbor: filesystem-backed Treants
//!
//! A Treant is a directory carrying a persisted state file of tags and
//! categories. Groups are Treants that also keep a collection of members.
//! Collections aggregate tags and categories across their members, flatten
//! nested Groups and partition members by category values.

pub mod category;
pub mod cli;
pub mod collection;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod treant;
pub mod workspace;

pub use category::{CategoryMap, CategoryValue};
pub use collection::{AggCategories, AggTags, Collection, Scope};
pub use error::TreantError;
pub use treant::{Group, Member, Treant, TreantInit, TreantRegistry};
pub use workspace::{DiscoveryConfig, Workspace};
