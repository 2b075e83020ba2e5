//! Item report endpoints

use super::{Envelope, missing};
use crate::client::RetrievixClient;
use crate::error::ApiResult;
use retrievix_match::{Item, ItemType};
use retrievix_store::NewItem;
use serde::Serialize;

/// `items` routes
#[derive(Clone)]
pub struct ItemsApi {
    client: RetrievixClient,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateItem<'a> {
    #[serde(flatten)]
    item: &'a NewItem,
    user_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Caller<'a> {
    user_id: &'a str,
}

impl ItemsApi {
    pub(crate) fn new(client: RetrievixClient) -> Self {
        Self { client }
    }

    /// GET items, optionally `?type=lost|found`
    pub async fn list(&self, item_type: Option<ItemType>) -> ApiResult<Vec<Item>> {
        let path = list_path(item_type);
        let envelope: Envelope = self.client.get(&path).await?;
        envelope.accepted()?.items.ok_or_else(|| missing("items"))
    }

    /// POST items; the service stores the report under `user_id`
    pub async fn create(&self, item: &NewItem, user_id: &str) -> ApiResult<Item> {
        let envelope: Envelope = self
            .client
            .post("items", &CreateItem { item, user_id })
            .await?;
        envelope.accepted()?.item.ok_or_else(|| missing("item"))
    }

    /// DELETE items/{id}; the service checks `user_id` against the owner.
    /// Returns the service's confirmation message.
    pub async fn delete(&self, id: &str, user_id: &str) -> ApiResult<String> {
        let envelope: Envelope = self
            .client
            .delete(&format!("items/{id}"), &Caller { user_id })
            .await?;
        Ok(envelope.accepted()?.message.unwrap_or_default())
    }
}

fn list_path(item_type: Option<ItemType>) -> String {
    match item_type {
        Some(t) => format!("items?type={}", t.as_str()),
        None => "items".to_string(),
    }
}
