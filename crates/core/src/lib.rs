//! Shared building blocks for Retrievix crates
//!
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Configuration**: TOML configuration with validation
//! - **Retry**: backoff policy and circuit breaker for the remote item service
//! - **Rate limiting**: per-endpoint token buckets
//! - **Validation**: fluent, error-collecting input validation
//!
//! # Example
//!
//! ```rust,no_run
//! use retrievix_core::config::Config;
//!
//! let config = Config::load(None)?;
//! println!("threshold = {}", config.schema.matching.threshold);
//! # Ok::<(), retrievix_core::Error>(())
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod rate_limit;
pub mod retry;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::rate_limit::{RateLimitConfig, RateLimiter};
    pub use crate::retry::{CircuitBreaker, CircuitBreakerConfig, CircuitState, RetryConfig};
    pub use crate::validation::{ValidationResult, Validator};
}
