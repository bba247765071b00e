//! HTTP client with courtesy rate limiting
//!
//! Every tool that talks to a remote JSON API goes through [`JsonClient`]:
//! one GET at a time, spaced by a [`RateLimiter`], decoded with serde.
//! Requests are never retried. A failed request surfaces to the caller,
//! which logs it and moves on to the next item.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::error::{Result, ToolError};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum requests per second, `0.0` disables spacing (default: 10.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 10)
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            requests_per_second: 10.0,
            timeout_secs: 10,
        }
    }
}

impl ClientConfig {
    /// Configuration without request spacing
    pub fn unthrottled(timeout_secs: u64) -> Self {
        Self {
            requests_per_second: 0.0,
            timeout_secs,
        }
    }
}

/// Rate limiter to control request frequency
///
/// Ensures requests are spaced at least `min_interval` apart. The first
/// request never waits.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// Non-positive or non-finite rates produce a limiter that never waits.
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = if requests_per_second.is_finite() && requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::ZERO
        };
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Acquire permission to make a request
    ///
    /// Sleeps until `min_interval` has passed since the previous call.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Rate-limited JSON-over-HTTP client
pub struct JsonClient {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
}

impl JsonClient {
    /// Create a client with default configuration and no extra headers
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default(), HeaderMap::new(), None)
    }

    /// Create a client with custom configuration
    ///
    /// # Arguments
    /// * `config` - timeout and request spacing
    /// * `headers` - headers sent with every request
    /// * `jar` - optional cookie jar, shared across requests
    pub fn with_config(
        config: ClientConfig,
        headers: HeaderMap,
        jar: Option<Arc<Jar>>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers);

        if let Some(jar) = jar {
            builder = builder.cookie_provider(jar);
        }

        let client = builder.build().map_err(ToolError::HttpError)?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.requests_per_second),
        })
    }

    /// Fetch `url` and decode the body as JSON
    ///
    /// # Errors
    /// - `HttpError` - network failure or undecodable body
    /// - `NotFound` - server answered 404
    /// - `Status` - any other non-success status
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        extra_headers: &[(HeaderName, HeaderValue)],
    ) -> Result<T> {
        self.rate_limiter.acquire().await;

        let mut request = self.client.get(url);
        for (name, value) in extra_headers {
            request = request.header(name.clone(), value.clone());
        }

        let response = request.send().await.map_err(ToolError::HttpError)?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ToolError::NotFound(url.to_string()));
        }

        if !status.is_success() {
            return Err(ToolError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(ToolError::HttpError)?;
        tracing::debug!(url, bytes = body.len(), "received response");
        serde_json::from_str(&body).map_err(ToolError::Json)
    }

    /// The limiter spacing this client's requests
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

/// Parses a header value, reporting which header was malformed
pub(crate) fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ToolError::InvalidArgument(format!("invalid value for header {}", name)))
}
