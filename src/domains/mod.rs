//! Domains module containing business logic organized by bounded contexts.
//!
//! - `tools` - the tool catalog and its execution
//! - `store` - the data-store contract the tools run against
//! - `agent` - the free-text front door in front of the tools

pub mod agent;
pub mod store;
pub mod tools;
