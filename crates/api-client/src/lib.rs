//! HTTP client for the Retrievix item service
//!
//! Talks to the lost-and-found REST service (`items` and `auth` routes) and
//! exposes it as an [`ItemStore`](retrievix_store::ItemStore), so the match
//! service can run against either local snapshots or the live backend.
//!
//! Every request goes through:
//! - **Retry**: exponential backoff on connection failures and 5xx answers
//! - **Circuit breaker**: stops calling a service that keeps failing
//! - **Rate limiting**: token bucket per endpoint group
//! - **Request IDs**: `X-Request-ID` header for correlating logs
//!
//! # Example
//!
//! ```rust,no_run
//! use retrievix_api_client::{ClientConfig, HttpItemStore, RetrievixClient};
//! use retrievix_store::{MatchService, Session};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RetrievixClient::with_config(ClientConfig::from_env()?)?;
//! let session: Session = client.auth().login("ana@example.com", "S3cret!pw").await?;
//!
//! let service = MatchService::new(HttpItemStore::new(client));
//! let dashboard = service.dashboard(&session).await?;
//! println!("{} suggestions", dashboard.suggestions.len());
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod store;

pub use client::RetrievixClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, Environment};
pub use endpoints::{Envelope, Registration, RemoteUser};
pub use error::{ApiError, ApiErrorCode, ApiResult};
pub use store::HttpItemStore;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::RetrievixClient;
    pub use crate::config::{ClientConfig, Environment};
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::store::HttpItemStore;
}
