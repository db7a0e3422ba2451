//! HTTP API client for the Stockline server
//!
//! Thin typed wrapper over the ingestion API. Batch submission carries the
//! retry policy: transport failures and 5xx responses are retried with
//! exponential backoff, while 4xx responses are terminal — re-sending a
//! payload the server has already judged malformed or unauthorized cannot
//! succeed.

use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use stockline_common::record::{BatchResponse, ErrorResponse, InsertResponse, ListResponse};
use stockline_common::ProductRecord;

/// Default timeout for API requests in seconds.
/// Can be overridden via STOCKLINE_API_TIMEOUT_SECS.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 10;

/// Default server URL when not specified.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Bounded retry with exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles every attempt after that.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    fn delay_before_attempt(&self, next_attempt: u32) -> Duration {
        // next_attempt is 2-based here: the first retry waits base_delay.
        self.base_delay * 2u32.saturating_pow(next_attempt.saturating_sub(2))
    }
}

/// Errors returned by the API client
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Rejected by server: {0}")]
    Rejected(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response ({status}): {message}")]
    Unexpected { status: u16, message: String },
}

impl ApiError {
    /// Transient failures worth another attempt. Auth and validation
    /// rejections are structural and are never retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Server { .. })
    }
}

/// API client for the Stockline server
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String, api_key: String) -> Result<Self, ApiError> {
        let timeout_secs = std::env::var("STOCKLINE_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key,
            retry: RetryPolicy::default(),
        })
    }

    /// Override the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a batch of records, retrying transient failures.
    pub async fn submit_batch(&self, records: &[ProductRecord]) -> Result<BatchResponse, ApiError> {
        let mut last_error = None;

        for attempt in 1..=self.retry.max_attempts {
            match self.submit_batch_once(records).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() => {
                    tracing::warn!(
                        attempt,
                        max_attempts = self.retry.max_attempts,
                        error = %e,
                        "Batch submission attempt failed"
                    );
                    last_error = Some(e);

                    if attempt < self.retry.max_attempts {
                        let backoff = self.retry.delay_before_attempt(attempt + 1);
                        tracing::debug!(backoff_ms = backoff.as_millis() as u64, "Retrying");
                        tokio::time::sleep(backoff).await;
                    }
                },
                Err(e) => return Err(e),
            }
        }

        match last_error {
            Some(err) => Err(err),
            None => Err(ApiError::Unexpected {
                status: 0,
                message: "retry loop ended without an error".to_string(),
            }),
        }
    }

    async fn submit_batch_once(&self, records: &[ProductRecord]) -> Result<BatchResponse, ApiError> {
        #[derive(Serialize)]
        struct BatchRequestRef<'a> {
            records: &'a [ProductRecord],
        }

        let url = format!("{}/api/products/batch", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(&BatchRequestRef { records })
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(response.json().await?),
            status => Err(classify_failure(status, response.text().await.ok()).await),
        }
    }

    /// Submit a single record. No retry; callers wanting resilience use the
    /// batch path.
    pub async fn submit_one(&self, record: &ProductRecord) -> Result<InsertResponse, ApiError> {
        let url = format!("{}/api/products", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("X-API-KEY", &self.api_key)
            .json(record)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => Ok(response.json().await?),
            status => Err(classify_failure(status, response.text().await.ok()).await),
        }
    }

    /// Fetch the full stored catalog.
    pub async fn list_all(&self) -> Result<ListResponse<ProductRecord>, ApiError> {
        let url = format!("{}/api/products", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => Err(classify_failure(status, response.text().await.ok()).await),
        }
    }
}

async fn classify_failure(status: StatusCode, body: Option<String>) -> ApiError {
    let message = body
        .as_deref()
        .map(extract_error_message)
        .unwrap_or_else(|| status.to_string());

    if status == StatusCode::UNAUTHORIZED {
        ApiError::Unauthorized(message)
    } else if status.is_client_error() {
        ApiError::Rejected(message)
    } else if status.is_server_error() {
        ApiError::Server {
            status: status.as_u16(),
            message,
        }
    } else {
        ApiError::Unexpected {
            status: status.as_u16(),
            message,
        }
    }
}

fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|parsed| parsed.error)
        .unwrap_or_else(|_| body.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_creation() {
        let client =
            ApiClient::new("http://localhost:8000".to_string(), "key".to_string()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_backoff_doubles() {
        let retry = RetryPolicy {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
        };
        assert_eq!(retry.delay_before_attempt(2), Duration::from_millis(100));
        assert_eq!(retry.delay_before_attempt(3), Duration::from_millis(200));
        assert_eq!(retry.delay_before_attempt(4), Duration::from_millis(400));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ApiError::Server {
            status: 503,
            message: "down".to_string()
        }
        .is_retryable());
        assert!(!ApiError::Rejected("No records provided".to_string()).is_retryable());
        assert!(!ApiError::Unauthorized("bad key".to_string()).is_retryable());
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            extract_error_message(r#"{"error": "No records provided"}"#),
            "No records provided"
        );
        assert_eq!(extract_error_message("plain text"), "plain text");
    }
}
