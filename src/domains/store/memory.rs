//! In-process item store.

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Item, ItemStore, StoreResult};

#[derive(Debug)]
struct MemoryState {
    items: Vec<Item>,
    next_id: i64,
}

/// Item store backed by a vector. Ids start at 1 and only grow.
#[derive(Debug)]
pub struct MemoryItemStore {
    state: Mutex<MemoryState>,
}

impl MemoryItemStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MemoryState {
                items: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn list_items(&self) -> StoreResult<Vec<Item>> {
        let state = self.state.lock().await;
        Ok(state.items.clone())
    }

    async fn insert_item(&self, name: &str) -> StoreResult<Item> {
        let mut state = self.state.lock().await;
        let item = Item {
            id: state.next_id,
            name: name.to_string(),
        };
        state.next_id += 1;
        state.items.push(item.clone());
        Ok(item)
    }
}
