//! Configuration loading and schema definitions
//!
//! One TOML file drives the matcher, browsing, the local store and the
//! remote API client.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
