//! Item store collaborator for the Retrievix match engine.
//!
//! - [`ItemStore`]: async persistence contract, with [`MemoryStore`] as the
//!   local implementation (JSON snapshots on disk)
//! - [`NewItem`]: report submission and its validation rules
//! - [`browse`]: listing filters and pagination
//! - [`MatchService`]: fetches with a timeout, then ranks suggestions and
//!   similar items
//!
//! # Example
//!
//! ```rust,no_run
//! use retrievix_store::{MatchService, MemoryStore, Session};
//!
//! # async fn run() -> retrievix_store::Result<()> {
//! let store = MemoryStore::from_json_file("items.json").await?;
//! let service = MatchService::new(store);
//! let dashboard = service.dashboard(&Session::new("user-1")).await?;
//! println!("{} suggestions", dashboard.suggestions.len());
//! # Ok(())
//! # }
//! ```

mod browse;
mod error;
mod memory;
mod service;
mod session;
mod store;
mod submission;

pub use browse::{BrowseFilter, BrowsePage, DEFAULT_PER_PAGE, PageLink, browse};
pub use error::{Result, StoreError, StoreErrorCode};
pub use memory::MemoryStore;
pub use service::{DEFAULT_FETCH_TIMEOUT, Dashboard, ItemDetail, MatchService, SimilarItem};
pub use session::Session;
pub use store::{ItemStore, ensure_owner};
pub use submission::{IMAGE_PREFIXES, MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS, NewItem};
