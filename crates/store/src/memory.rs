//! In-memory item store with JSON snapshots.

use crate::error::{Result, StoreError};
use crate::session::Session;
use crate::store::{ItemStore, ensure_owner};
use crate::submission::NewItem;
use retrievix_match::{Item, ItemStatus, ItemType};
use std::collections::HashSet;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Items held in a vector behind an async lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<Vec<Item>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with existing records. Every item needs a unique, non-blank id.
    pub fn with_items(items: Vec<Item>) -> Result<Self> {
        {
            let mut seen = HashSet::new();
            for item in &items {
                if item.id.trim().is_empty() {
                    return Err(StoreError::Validation("item without an id".to_string()));
                }
                if !seen.insert(item.id.as_str()) {
                    return Err(StoreError::Validation(format!(
                        "duplicate item id {}",
                        item.id
                    )));
                }
            }
        }
        Ok(Self {
            items: RwLock::new(items),
        })
    }

    /// Load a snapshot written by [`save_json_file`](Self::save_json_file).
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        let items: Vec<Item> = serde_json::from_str(&content)?;
        debug!(path = %path.display(), count = items.len(), "loaded item snapshot");
        Self::with_items(items)
    }

    /// Write every item as a JSON array.
    pub async fn save_json_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = {
            let items = self.items.read().await;
            serde_json::to_string_pretty(&*items)?
        };
        tokio::fs::write(path, json).await?;
        debug!(path = %path.display(), "saved item snapshot");
        Ok(())
    }

    /// Copy of every item in insertion order.
    pub async fn snapshot(&self) -> Vec<Item> {
        self.items.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

fn new_id(item_type: ItemType) -> String {
    let prefix = match item_type {
        ItemType::Lost => "L",
        ItemType::Found => "F",
    };
    format!("{prefix}-{}", Uuid::new_v4())
}

impl ItemStore for MemoryStore {
    async fn insert(&self, item: NewItem, session: &Session) -> Result<Item> {
        item.check()?;
        let id = new_id(item.item_type);
        let stored = item.into_item(id, session);
        self.items.write().await.push(stored.clone());
        info!(id = %stored.id, item_type = %stored.item_type, user = %session.user_id, "item reported");
        Ok(stored)
    }

    async fn list(&self, item_type: Option<ItemType>) -> Result<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|i| item_type.is_none_or(|t| i.item_type == t))
            .cloned()
            .collect())
    }

    async fn list_by_user(&self, user_id: &str, item_type: ItemType) -> Result<Vec<Item>> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|i| i.item_type == item_type && i.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> Result<Item> {
        self.items
            .read()
            .await
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn delete(&self, id: &str, session: &Session) -> Result<()> {
        let mut items = self.items.write().await;
        let idx = items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        ensure_owner(&items[idx], session, "delete")?;
        items.remove(idx);
        info!(id, user = %session.user_id, "item deleted");
        Ok(())
    }

    async fn resolve(&self, id: &str, session: &Session) -> Result<Item> {
        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        ensure_owner(item, session, "resolve")?;
        if item.status == ItemStatus::Resolved {
            return Err(StoreError::AlreadyResolved(id.to_string()));
        }
        item.status = ItemStatus::Resolved;
        info!(id, user = %session.user_id, "item resolved");
        Ok(item.clone())
    }
}
