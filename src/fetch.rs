//! Bounded-retry HTTP request executor
//!
//! Wraps `reqwest::Client` with a per-request deadline and a flat retry
//! policy for transient failures. One logical fetch makes sequential
//! attempts; there are never concurrent in-flight attempts for the same
//! request.

use crate::error::{FeedError, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Default per-request deadline
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Default pause between failed attempts (flat, not exponential)
pub const DEFAULT_RETRY_PAUSE: Duration = Duration::from_millis(500);

/// Successful fetch payload
///
/// Carries the raw body together with the confirming status code from the
/// same attempt that produced it.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Response status, guaranteed to be in the 2xx range
    pub status: StatusCode,
    /// Raw response body
    pub body: Vec<u8>,
}

/// HTTP request executor with bounded resilience to transient failure
///
/// An attempt succeeds only if the transport completes without error AND the
/// response status is 2xx; anything else (transport error, timeout, non-2xx)
/// counts as a failed attempt and is retried after a fixed pause, up to the
/// caller's retry budget. Cancellation short-circuits immediately and is
/// never retried.
#[derive(Debug, Clone)]
pub struct RetryingFetcher {
    client: Client,
    retry_pause: Duration,
}

impl RetryingFetcher {
    /// Creates a fetcher with the default deadline and retry pause.
    pub fn new() -> Self {
        Self::with_policy(DEFAULT_REQUEST_TIMEOUT, DEFAULT_RETRY_PAUSE)
    }

    /// Creates a fetcher with a custom per-request deadline and retry pause.
    pub fn with_policy(timeout: Duration, retry_pause: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("market-feeds/0.1.0")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            retry_pause,
        }
    }

    /// Creates a fetcher from an existing client and retry pause.
    pub fn with_client(client: Client, retry_pause: Duration) -> Self {
        Self {
            client,
            retry_pause,
        }
    }

    /// The underlying client, for building requests against it.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Executes a request with up to `max_retries + 1` total attempts.
    pub async fn fetch(&self, request: RequestBuilder, max_retries: u32) -> Result<FetchOutcome> {
        self.fetch_with_cancel(request, max_retries, &CancellationToken::new())
            .await
    }

    /// Executes a request with up to `max_retries + 1` total attempts,
    /// aborting as soon as `cancel` fires.
    ///
    /// Returns the first successful payload, [`FeedError::Cancelled`] on
    /// cancellation, or the last observed error once attempts are exhausted.
    /// Intermediate failures are not individually reported.
    pub async fn fetch_with_cancel(
        &self,
        request: RequestBuilder,
        max_retries: u32,
        cancel: &CancellationToken,
    ) -> Result<FetchOutcome> {
        let mut last_error = FeedError::Connection("No fetch attempts were made".to_string());

        for attempt in 0..=max_retries {
            let req = request.try_clone().ok_or_else(|| {
                FeedError::InvalidRequest("Request body cannot be cloned for retry".to_string())
            })?;

            let outcome = tokio::select! {
                _ = cancel.cancelled() => return Err(FeedError::Cancelled),
                outcome = Self::attempt(req) => outcome,
            };

            match outcome {
                Ok(success) => {
                    debug!(
                        attempt,
                        status = success.status.as_u16(),
                        bytes = success.body.len(),
                        "Fetch succeeded"
                    );
                    return Ok(success);
                }
                Err(e) => {
                    warn!(
                        attempt,
                        max_retries,
                        error = %e,
                        "Fetch attempt failed"
                    );
                    last_error = e;
                }
            }

            // Brief pause before retry, skipped after the final attempt
            if attempt < max_retries {
                tokio::select! {
                    _ = cancel.cancelled() => return Err(FeedError::Cancelled),
                    _ = sleep(self.retry_pause) => {}
                }
            }
        }

        Err(last_error)
    }

    /// One attempt: send, gate on a 2xx status, read the body.
    async fn attempt(request: RequestBuilder) -> Result<FetchOutcome> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.bytes().await?.to_vec();
        Ok(FetchOutcome { status, body })
    }
}

impl Default for RetryingFetcher {
    fn default() -> Self {
        Self::new()
    }
}
