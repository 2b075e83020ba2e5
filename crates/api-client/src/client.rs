//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{AuthApi, ItemsApi};
use crate::error::{ApiError, ApiResult, ErrorContext};
use retrievix_core::rate_limit::RateLimiter;
use retrievix_core::retry::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
use retrievix_store::Session;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Client for the Retrievix REST service with built-in resilience patterns
///
/// This client wraps `reqwest` and adds:
/// - Retry with exponential backoff for connection failures and 5xx answers
/// - A circuit breaker shared by all clones
/// - Per-endpoint rate limiting
/// - An `X-Request-ID` header on every attempt
///
/// Cloning is cheap; clones share the connection pool, breaker and limiter.
#[derive(Clone)]
pub struct RetrievixClient {
    inner: Client,
    config: Arc<ClientConfig>,
    circuit_breaker: Arc<CircuitBreaker>,
    rate_limiter: Arc<RateLimiter>,
    token: Option<Arc<str>>,
}

impl RetrievixClient {
    /// Create a new client with configuration from the environment
    pub fn new() -> ApiResult<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("retrievix-api-client/", env!("CARGO_PKG_VERSION"))),
        );

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()?;

        Ok(Self {
            inner,
            circuit_breaker: Arc::new(CircuitBreaker::new(CircuitBreakerConfig::default())),
            rate_limiter: Arc::new(RateLimiter::new(config.rate_limit.clone())),
            config: Arc::new(config),
            token: None,
        })
    }

    /// A clone that sends the session's token as a bearer credential
    #[must_use]
    pub fn for_session(&self, session: &Session) -> Self {
        Self {
            token: session.token.as_deref().map(Arc::from),
            ..self.clone()
        }
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    #[must_use]
    pub fn circuit_state(&self) -> CircuitState {
        self.circuit_breaker.state()
    }

    pub fn reset_circuit(&self) {
        self.circuit_breaker.reset();
    }

    /// Reset rate limits for an endpoint group such as `items`
    pub fn reset_rate_limit(&self, endpoint: &str) {
        self.rate_limiter.reset(endpoint);
    }

    /// Item report endpoints
    #[must_use]
    pub fn items(&self) -> ItemsApi {
        ItemsApi::new(self.clone())
    }

    /// Registration and login endpoints
    #[must_use]
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Low-level HTTP methods with resilience
    // -------------------------------------------------------------------------

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(Method::GET, path, Option::<&()>::None).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> ApiResult<T> {
        self.request(Method::POST, path, Some(body)).await
    }

    /// DELETE with a JSON body; the item service reads the caller's id from it
    pub async fn delete<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.request(Method::DELETE, path, Some(body)).await
    }

    /// Execute a request with full resilience patterns
    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let context = ErrorContext {
            request_id: Some(Uuid::new_v4().to_string()),
            endpoint: path.to_string(),
            method: method.to_string(),
        };

        if !self.circuit_breaker.can_execute() {
            warn!(request = %context, "Circuit breaker is open, rejecting request");
            return Err(ApiError::CircuitOpen);
        }

        let key = rate_limit_key(path);
        if !self.rate_limiter.try_acquire(&key) {
            let wait = self.rate_limiter.time_until_available(&key);
            warn!(request = %context, retry_in_ms = wait.as_millis(), "Rate limited");
            return Err(ApiError::RateLimited);
        }

        self.execute_with_retry(&context, method, path, body).await
    }

    async fn execute_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        context: &ErrorContext,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let retry = &self.config.retry;
        let url = self.config.url(path);
        let mut last_error: Option<ApiError> = None;

        for attempt in 0..retry.max_attempts {
            if attempt > 0 {
                let delay = retry.delay_for_attempt(attempt);
                debug!(
                    request = %context,
                    attempt,
                    delay_ms = delay.as_millis(),
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            let start = Instant::now();
            let result = self
                .execute_single_request(context, method.clone(), &url, body)
                .await;

            match result {
                Ok(value) => {
                    self.circuit_breaker.record_success();
                    debug!(
                        request = %context,
                        attempt = attempt + 1,
                        elapsed_ms = start.elapsed().as_millis(),
                        "Request succeeded"
                    );
                    return Ok(value);
                }
                Err(e) if e.is_retryable() => {
                    self.circuit_breaker.record_failure();
                    debug!(request = %context, attempt = attempt + 1, error = %e, "Request failed");
                    last_error = Some(e);
                }
                Err(e) => {
                    // A 4xx still proves the service is up.
                    if e.is_client_error() {
                        self.circuit_breaker.record_success();
                    }
                    return Err(e);
                }
            }
        }

        let last_error = last_error.map_or_else(|| "unknown error".to_string(), |e| e.to_string());
        warn!(request = %context, attempts = retry.max_attempts, error = %last_error, "Retries exhausted");
        Err(ApiError::RetriesExhausted {
            attempts: retry.max_attempts,
            last_error,
        })
    }

    async fn execute_single_request<T: DeserializeOwned, B: Serialize>(
        &self,
        context: &ErrorContext,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> ApiResult<T> {
        let mut request = self.inner.request(method, url);
        if let Some(ref id) = context.request_id {
            request = request.header(X_REQUEST_ID, id.as_str());
        }
        if let Some(ref token) = self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(b) = body {
            request = request.json(b);
        }

        let response = request.send().await?;
        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let status = response.status();

    if status.is_success() {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    } else {
        let message = response
            .text()
            .await
            .ok()
            .filter(|body| !body.trim().is_empty())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
        Err(ApiError::api_response(status.as_u16(), message))
    }
}

/// Endpoint group used as the rate limit key: `items?type=lost` → `items`
fn rate_limit_key(path: &str) -> String {
    path.trim_start_matches('/')
        .split(['/', '?'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("default")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use retrievix_core::rate_limit::RateLimitConfig;
    use retrievix_core::retry::RetryConfig;

    #[test]
    fn test_rate_limit_key() {
        assert_eq!(rate_limit_key("items?type=lost"), "items");
        assert_eq!(rate_limit_key("/items/F-1"), "items");
        assert_eq!(rate_limit_key("auth/login"), "auth");
        assert_eq!(rate_limit_key(""), "default");
    }

    #[test]
    fn test_client_creation() {
        assert!(RetrievixClient::with_config(ClientConfig::development()).is_ok());

        let bad = ClientConfig::development().with_base_url("localhost:5000");
        assert!(RetrievixClient::with_config(bad).is_err());
    }

    #[test]
    fn test_for_session_carries_token() {
        let client = RetrievixClient::with_config(ClientConfig::development()).unwrap();
        assert!(client.token.is_none());

        let authed = client.for_session(&Session::new("u-1").with_token("t0k"));
        assert_eq!(authed.token.as_deref(), Some("t0k"));

        // Clones share the breaker
        authed.circuit_breaker.record_failure();
        assert!(Arc::ptr_eq(&client.circuit_breaker, &authed.circuit_breaker));
    }

    #[tokio::test]
    async fn test_unreachable_service_exhausts_retries() {
        // Port 9 (discard) is not listening on test machines
        let config = ClientConfig::development()
            .with_base_url("http://127.0.0.1:9/api")
            .with_retry(RetryConfig {
                max_attempts: 2,
                initial_delay: std::time::Duration::from_millis(1),
                max_delay: std::time::Duration::from_millis(1),
                backoff_multiplier: 1.0,
                jitter: false,
            });
        let client = RetrievixClient::with_config(config).unwrap();

        let err = client.get::<serde_json::Value>("items").await.unwrap_err();
        assert!(matches!(err, ApiError::RetriesExhausted { attempts: 2, .. }));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_rate_limited_before_sending() {
        let config = ClientConfig::development().with_rate_limit(RateLimitConfig {
            max_requests: 1,
            window: std::time::Duration::from_secs(3600),
            burst: 0,
        });
        let client = RetrievixClient::with_config(config.with_base_url("http://127.0.0.1:9/api"))
            .unwrap();

        // Drain the single token, then the next call never reaches the network
        assert!(client.rate_limiter.try_acquire("items"));
        let err = client.get::<serde_json::Value>("items").await.unwrap_err();
        assert!(matches!(err, ApiError::RateLimited));
    }

    #[tokio::test]
    async fn test_open_circuit_rejects() {
        let client = RetrievixClient::with_config(ClientConfig::development()).unwrap();
        for _ in 0..CircuitBreakerConfig::default().failure_threshold {
            client.circuit_breaker.record_failure();
        }
        assert_eq!(client.circuit_state(), CircuitState::Open);

        let err = client.get::<serde_json::Value>("items").await.unwrap_err();
        assert!(matches!(err, ApiError::CircuitOpen));

        client.reset_circuit();
        assert_eq!(client.circuit_state(), CircuitState::Closed);
    }
}
