//! Tool definitions module.
//!
//! Each tool is defined in its own file and bound into the registry in
//! `registry.rs`.

mod create_item;
mod items_table;

pub use create_item::CreateItemTool;
pub use items_table::ItemsTableTool;
