//! The item store abstraction.

use crate::error::{Result, StoreError};
use crate::session::Session;
use crate::submission::NewItem;
use retrievix_match::{Item, ItemType};
use std::future::Future;

/// Persistence for item reports.
///
/// Implementations keep items in insertion order and enforce ownership on
/// every mutation. `list_by_user` and `get` have default implementations in
/// terms of `list` for backends without dedicated lookups.
pub trait ItemStore: Send + Sync {
    /// Validate and store a new report owned by `session`'s user.
    fn insert(&self, item: NewItem, session: &Session) -> impl Future<Output = Result<Item>> + Send;

    /// All items, or only those of one type.
    fn list(&self, item_type: Option<ItemType>) -> impl Future<Output = Result<Vec<Item>>> + Send;

    /// One user's items of one type.
    fn list_by_user(
        &self,
        user_id: &str,
        item_type: ItemType,
    ) -> impl Future<Output = Result<Vec<Item>>> + Send {
        async move {
            let items = self.list(Some(item_type)).await?;
            Ok(items.into_iter().filter(|i| i.user_id == user_id).collect())
        }
    }

    /// A single item by id.
    fn get(&self, id: &str) -> impl Future<Output = Result<Item>> + Send {
        async move {
            self.list(None)
                .await?
                .into_iter()
                .find(|i| i.id == id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))
        }
    }

    /// Remove an item; only its owner may do this.
    fn delete(&self, id: &str, session: &Session) -> impl Future<Output = Result<()>> + Send;

    /// Mark an item resolved; only its owner may do this.
    fn resolve(&self, id: &str, session: &Session) -> impl Future<Output = Result<Item>> + Send;
}

/// Fail with `Unauthorized` unless `session` owns `item`.
pub fn ensure_owner(item: &Item, session: &Session, action: &str) -> Result<()> {
    if item.is_owned_by(&session.user_id) {
        Ok(())
    } else {
        Err(StoreError::Unauthorized(format!(
            "only the reporting user may {action} item {}",
            item.id
        )))
    }
}
