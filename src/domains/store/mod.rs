//! Item store domain module.
//!
//! The tool handlers talk to the relational data store only through the
//! [`ItemStore`] trait: a read of every item and a single-row insert.
//!
//! ## Backends
//!
//! - `postgres.rs` - PostgreSQL via sqlx, one fresh connection per call
//! - `memory.rs` - in-process store for demos and tests
//!
//! Row order from [`ItemStore::list_items`] is ascending by id for both
//! backends. Nothing else about ordering is promised.

mod error;
mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::config::{DatabaseBackend, DatabaseConfig};

pub use error::{StoreError, StoreResult};
pub use memory::MemoryItemStore;
pub use postgres::PgItemStore;

/// A persisted item. The id is assigned by the store at insert time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
}

/// Narrow read/write contract over the `items` table.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Read all items, ordered by ascending id.
    async fn list_items(&self) -> StoreResult<Vec<Item>>;

    /// Insert one item and return the stored row.
    async fn insert_item(&self, name: &str) -> StoreResult<Item>;
}

/// Build the store selected by configuration.
///
/// For PostgreSQL this does not connect unless schema bootstrap is
/// enabled; connections are opened per call.
pub async fn open_store(config: &DatabaseConfig) -> StoreResult<Arc<dyn ItemStore>> {
    match config.backend {
        DatabaseBackend::Memory => {
            info!("Using in-memory item store");
            let store: Arc<dyn ItemStore> = Arc::new(MemoryItemStore::new());
            Ok(store)
        }
        DatabaseBackend::Postgres => {
            info!(
                "Using PostgreSQL item store at {}:{}/{}",
                config.host, config.port, config.name
            );
            let store = PgItemStore::new(config);
            if config.init_schema {
                store.ensure_schema().await?;
            }
            let store: Arc<dyn ItemStore> = Arc::new(store);
            Ok(store)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_memory_store() {
        let config = DatabaseConfig {
            backend: DatabaseBackend::Memory,
            ..DatabaseConfig::default()
        };
        let store = open_store(&config).await.unwrap();
        assert!(store.list_items().await.unwrap().is_empty());
    }
}
