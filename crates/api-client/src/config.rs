//! Configuration for the Retrievix API client
//!
//! Settings come from the `[api]` section of the TOML config, from
//! environment variables, or from the presets below.

use crate::error::{ApiError, ApiResult};
use retrievix_core::config::ApiConfig;
use retrievix_core::rate_limit::RateLimitConfig;
use retrievix_core::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Base URL of a locally running item service
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Deployment the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Service on the developer's machine
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Read `RETRIEVIX_ENV`; anything unrecognised is development
    pub fn from_env() -> Self {
        match env::var("RETRIEVIX_ENV")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            "staging" | "stage" => Self::Staging,
            _ => Self::Development,
        }
    }

    fn retry(self) -> RetryConfig {
        match self {
            Self::Development => RetryConfig::quick(),
            Self::Staging => RetryConfig::default(),
            Self::Production => RetryConfig::patient(),
        }
    }

    fn rate_limit(self) -> RateLimitConfig {
        match self {
            Self::Development => RateLimitConfig::per_minute(1000),
            Self::Staging => RateLimitConfig::per_minute(300),
            Self::Production => RateLimitConfig::per_minute(120),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service root, e.g. `http://localhost:5000/api`
    pub base_url: String,
    /// Per-request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    pub retry: RetryConfig,
    /// Applied per endpoint group (`items`, `auth`)
    pub rate_limit: RateLimitConfig,
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// - `RETRIEVIX_API_URL`: service root (default [`DEFAULT_BASE_URL`])
    /// - `RETRIEVIX_ENV`: development / staging / production
    /// - `RETRIEVIX_TIMEOUT_SECS`: request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        let environment = Environment::from_env();

        let base_url =
            env::var("RETRIEVIX_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout = match env::var("RETRIEVIX_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map(Duration::from_secs)
                .map_err(|_| ApiError::config(format!("RETRIEVIX_TIMEOUT_SECS is not a number: {raw}")))?,
            Err(_) => DEFAULT_TIMEOUT,
        };

        let config = Self {
            base_url,
            timeout,
            retry: environment.retry(),
            rate_limit: environment.rate_limit(),
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    /// Configuration from the `[api]` config section, with environment
    /// variables taking precedence
    pub fn from_api_config(api: &ApiConfig) -> ApiResult<Self> {
        let environment = Environment::from_env();
        let mut config = Self {
            base_url: api.base_url.clone(),
            timeout: Duration::from_secs(api.timeout_secs),
            retry: environment.retry(),
            rate_limit: environment.rate_limit(),
            environment,
        };

        if let Ok(url) = env::var("RETRIEVIX_API_URL") {
            config.base_url = url;
        }
        if let Some(secs) = env::var("RETRIEVIX_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Local service with quick retries
    pub fn development() -> Self {
        Self::for_environment(DEFAULT_BASE_URL, Environment::Development)
    }

    pub fn staging(base_url: impl Into<String>) -> Self {
        Self::for_environment(base_url, Environment::Staging)
    }

    pub fn production(base_url: impl Into<String>) -> Self {
        Self::for_environment(base_url, Environment::Production)
    }

    fn for_environment(base_url: impl Into<String>, environment: Environment) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            retry: environment.retry(),
            rate_limit: environment.rate_limit(),
            environment,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit: RateLimitConfig) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Absolute URL for a path relative to the service root
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(format!(
                "base_url must start with http:// or https://, got {}",
                self.base_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout must be greater than zero"));
        }

        if self.retry.max_attempts == 0 {
            return Err(ApiError::config("retry.max_attempts must be at least 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.environment, Environment::Development);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = ClientConfig::development().with_base_url("http://svc:5000/api/");
        assert_eq!(config.url("items"), "http://svc:5000/api/items");
        assert_eq!(config.url("/auth/login"), "http://svc:5000/api/auth/login");
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let empty = ClientConfig::development().with_base_url("");
        assert!(matches!(empty.validate(), Err(ApiError::Config(_))));

        let ftp = ClientConfig::development().with_base_url("ftp://svc/api");
        assert!(matches!(ftp.validate(), Err(ApiError::InvalidUrl(_))));

        let zero = ClientConfig::development().with_timeout(Duration::ZERO);
        assert!(zero.validate().is_err());

        let mut no_attempts = ClientConfig::development();
        no_attempts.retry.max_attempts = 0;
        assert!(no_attempts.validate().is_err());
    }

    #[test]
    fn test_presets_scale_retries() {
        let dev = ClientConfig::development();
        let prod = ClientConfig::production("https://retrievix.example/api");
        assert!(prod.retry.max_attempts >= dev.retry.max_attempts);
        assert!(prod.rate_limit.max_requests < dev.rate_limit.max_requests);
    }

    #[test]
    fn test_timeout_serializes_as_seconds() {
        let config = ClientConfig::staging("https://staging.example/api")
            .with_timeout(Duration::from_secs(12));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["timeout"], 12);
        assert_eq!(json["environment"], "staging");
    }
}
