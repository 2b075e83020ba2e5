//! Endpoint-specific API implementations
//!
//! | Module | Routes |
//! |--------|--------|
//! | `items` | `GET items`, `POST items`, `DELETE items/{id}` |
//! | `auth` | `POST auth/register`, `POST auth/login` |
//!
//! Every route answers HTTP 200 with an [`Envelope`]; failures are reported
//! through `success: false` and a message rather than the status code.

pub mod auth;
pub mod items;

pub use auth::{AuthApi, Registration, RemoteUser};
pub use items::ItemsApi;

use crate::error::{ApiError, ApiResult};
use retrievix_match::Item;
use serde::Deserialize;

/// Response body shared by all routes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub item: Option<Item>,
    #[serde(default)]
    pub items: Option<Vec<Item>>,
    #[serde(default)]
    pub user: Option<RemoteUser>,
}

impl Envelope {
    /// Turn `success: false` into [`ApiError::Rejected`]
    pub fn accepted(self) -> ApiResult<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "request rejected".to_string()),
            ))
        }
    }
}

/// A successful envelope without the payload the route promises
pub(crate) fn missing(field: &str) -> ApiError {
    ApiError::Json(serde::de::Error::custom(format!(
        "response is missing `{field}`"
    )))
}
