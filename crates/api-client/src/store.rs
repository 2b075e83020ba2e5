//! [`ItemStore`] backed by the remote item service.

use crate::client::RetrievixClient;
use crate::error::ApiError;
use retrievix_match::{Item, ItemType};
use retrievix_store::{ItemStore, NewItem, Result, Session, StoreError};
use tracing::info;

/// Item store that forwards every call to the REST service.
///
/// The service has no single-item or status routes: `get` and
/// `list_by_user` filter the full listing, and `resolve` is unsupported.
#[derive(Clone)]
pub struct HttpItemStore {
    client: RetrievixClient,
}

impl HttpItemStore {
    pub fn new(client: RetrievixClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &RetrievixClient {
        &self.client
    }
}

/// Reads fail only because the service could not deliver.
fn read_error(err: ApiError) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

/// Writes distinguish refusals from transport failures.
fn write_error(err: ApiError, id: Option<&str>) -> StoreError {
    if err.is_transport() {
        return StoreError::Unavailable(err.to_string());
    }
    match err {
        ApiError::Rejected(message) => {
            let lower = message.to_lowercase();
            if lower.contains("unauthorized") {
                StoreError::Unauthorized(message)
            } else if lower.contains("not found") {
                StoreError::NotFound(id.map_or(message, str::to_string))
            } else {
                StoreError::Validation(message)
            }
        }
        ApiError::ApiResponse { status: 401 | 403, message } => StoreError::Unauthorized(message),
        ApiError::ApiResponse { status: 404, message } => {
            StoreError::NotFound(id.map_or(message, str::to_string))
        }
        ApiError::ApiResponse { message, .. } => StoreError::Validation(message),
        other => StoreError::Unavailable(other.to_string()),
    }
}

impl ItemStore for HttpItemStore {
    async fn insert(&self, item: NewItem, session: &Session) -> Result<Item> {
        item.check()?;
        let stored = self
            .client
            .for_session(session)
            .items()
            .create(&item, &session.user_id)
            .await
            .map_err(|e| write_error(e, None))?;
        info!(id = %stored.id, kind = %stored.item_type, user = %session.user_id, "item reported");
        Ok(stored)
    }

    async fn list(&self, item_type: Option<ItemType>) -> Result<Vec<Item>> {
        self.client.items().list(item_type).await.map_err(read_error)
    }

    async fn delete(&self, id: &str, session: &Session) -> Result<()> {
        self.client
            .for_session(session)
            .items()
            .delete(id, &session.user_id)
            .await
            .map_err(|e| write_error(e, Some(id)))?;
        info!(id, user = %session.user_id, "item deleted");
        Ok(())
    }

    async fn resolve(&self, _id: &str, _session: &Session) -> Result<Item> {
        Err(StoreError::Unavailable(
            "not supported by remote service".to_string(),
        ))
    }
}
