//! HTTP transport to the tucarga backend
//!
//! Wraps a shared `reqwest::Client` with the backend base URL, the per-request
//! timeout and the retry policy used for idempotent lookups:
//! - 5xx responses and network errors are retried with exponential backoff
//! - timeouts and 4xx responses are returned immediately
//! - POSTs are never retried

use crate::config::DirectorySection;
use crate::error::{QuoteError, QuoteResult};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// HTTP access to the backend rooted at a base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    timeout: Duration,
    retry_attempts: usize,
}

impl HttpTransport {
    /// Create a transport from the directory configuration section
    pub fn new(config: &DirectorySection) -> QuoteResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|source| {
            crate::config::ConfigError::InvalidUrl {
                url: config.base_url.clone(),
                source,
            }
        })?;

        if base_url.cannot_be_a_base() {
            return Err(crate::config::ConfigError::InvalidConfig(format!(
                "'{}' cannot be used as a base URL",
                config.base_url
            ))
            .into());
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| QuoteError::transport(config.base_url.clone(), e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout(),
            retry_attempts: config.retry_attempts,
        })
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    ///
    /// A trailing empty segment produces a trailing slash.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET with retry on transient failures.
    ///
    /// Returns the final response whatever its status; callers decide which
    /// statuses are meaningful for their endpoint.
    pub async fn get(&self, url: Url) -> QuoteResult<Response> {
        let endpoint = url.path().to_string();
        let mut last_error = None;

        for attempt in 0..=self.retry_attempts {
            debug!(
                attempt = attempt + 1,
                max_attempts = self.retry_attempts + 1,
                url = %url,
                "Calling directory endpoint"
            );

            match self
                .client
                .get(url.clone())
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .timeout(self.timeout)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();

                    if status.is_server_error() && attempt < self.retry_attempts {
                        warn!(
                            status = %status,
                            attempt = attempt + 1,
                            endpoint = %endpoint,
                            "Directory returned server error, retrying..."
                        );
                        tokio::time::sleep(backoff(attempt)).await;
                        last_error = Some(format!("Server error: {status}"));
                        continue;
                    }

                    return Ok(response);
                }
                Err(e) if e.is_timeout() => {
                    return Err(QuoteError::timeout(endpoint));
                }
                Err(e) if attempt < self.retry_attempts => {
                    warn!(
                        error = %e,
                        attempt = attempt + 1,
                        endpoint = %endpoint,
                        "Directory network error, retrying..."
                    );
                    tokio::time::sleep(backoff(attempt)).await;
                    last_error = Some(format!("Network error: {e}"));
                    continue;
                }
                Err(e) => {
                    return Err(QuoteError::transport(endpoint, e.to_string()));
                }
            }
        }

        Err(QuoteError::transport(
            endpoint,
            format!(
                "failed after {} retries: {}",
                self.retry_attempts,
                last_error.unwrap_or_else(|| "Unknown error".to_string())
            ),
        ))
    }

    /// POST a JSON body once.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &T,
    ) -> QuoteResult<Response> {
        let endpoint = url.path().to_string();

        debug!(url = %url, "Posting to backend");

        self.client
            .post(url)
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    QuoteError::timeout(endpoint)
                } else {
                    QuoteError::transport(endpoint, e.to_string())
                }
            })
    }
}

/// Exponential backoff: 100ms, 200ms, 400ms, ...
fn backoff(attempt: usize) -> Duration {
    let exponent = u32::try_from(attempt).unwrap_or(u32::MAX).min(10);
    Duration::from_millis(100 * 2_u64.pow(exponent))
}
