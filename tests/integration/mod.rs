//! Integration tests for arbor Treants, Groups and Collections

mod collection_membership;
mod config_integration;
mod flatten;
mod groupby;
mod store_integration;
