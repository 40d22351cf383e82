//! Configuration Management
//!
//! This module handles loading and managing configuration for the trade
//! stream and the news fetcher, including API credentials.

pub mod credentials;

use std::time::Duration;

// Re-export
pub use credentials::{Credentials, SecretString};

/// Default WebSocket base URL for trade streams
const DEFAULT_STREAM_WS_URL: &str = "wss://stream.binance.com:9443/ws";

/// Default delay before a reconnect attempt
const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Default news search endpoint
const DEFAULT_NEWS_API_URL: &str = "https://newsapi.org/v2/everything";

/// Default news search term
const DEFAULT_NEWS_QUERY: &str = "crypto";

/// Default per-request deadline for news fetches
const DEFAULT_NEWS_TIMEOUT: Duration = Duration::from_secs(15);

/// Default pause between failed fetch attempts
const DEFAULT_NEWS_RETRY_PAUSE: Duration = Duration::from_millis(500);

/// Default retry budget for news fetches
const DEFAULT_NEWS_MAX_RETRIES: u32 = 1;

/// Trade stream configuration
///
/// ## Environment Variables
///
/// - `STREAM_WS_URL`: WebSocket base URL (default: wss://stream.binance.com:9443/ws)
/// - `STREAM_RECONNECT_DELAY_MS`: delay before reconnecting (default: 1000)
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// WebSocket base URL, without trailing slash
    pub base_url: String,

    /// Fixed delay between a connection loss and the next connect attempt
    pub reconnect_delay: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_STREAM_WS_URL.to_string(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
        }
    }
}

impl StreamConfig {
    /// Load stream configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("STREAM_WS_URL").unwrap_or_else(|_| DEFAULT_STREAM_WS_URL.to_string());

        let reconnect_delay = std::env::var("STREAM_RECONNECT_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RECONNECT_DELAY);

        Self {
            base_url,
            reconnect_delay,
        }
    }

    /// Builds the trade stream URL for a subscription key, e.g.
    /// `wss://stream.binance.com:9443/ws/btcusdt@trade`.
    ///
    /// The key is lowercased first. Returns `None` when the key cannot form a
    /// valid endpoint (empty, or containing non-alphanumeric characters).
    pub fn trade_stream_url(&self, key: &str) -> Option<String> {
        let key = key.to_lowercase();
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        Some(format!("{}/{}@trade", self.base_url, key))
    }
}

/// News fetch configuration
///
/// ## Environment Variables
///
/// - `NEWS_API_URL`: search endpoint (default: https://newsapi.org/v2/everything)
/// - `NEWS_QUERY`: search term (default: crypto)
/// - `NEWS_REQUEST_TIMEOUT_SECS`: per-request deadline (default: 15)
/// - `NEWS_RETRY_PAUSE_MS`: pause between attempts (default: 500)
/// - `NEWS_MAX_RETRIES`: retry budget per fetch (default: 1)
#[derive(Debug, Clone)]
pub struct NewsConfig {
    /// Search endpoint URL
    pub base_url: String,

    /// Fixed search term sent as the `q` parameter
    pub query: String,

    /// Per-request deadline enforced by the HTTP client
    pub request_timeout: Duration,

    /// Fixed pause between failed attempts
    pub retry_pause: Duration,

    /// Retries after the first attempt; a fetch makes at most
    /// `max_retries + 1` attempts
    pub max_retries: u32,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NEWS_API_URL.to_string(),
            query: DEFAULT_NEWS_QUERY.to_string(),
            request_timeout: DEFAULT_NEWS_TIMEOUT,
            retry_pause: DEFAULT_NEWS_RETRY_PAUSE,
            max_retries: DEFAULT_NEWS_MAX_RETRIES,
        }
    }
}

impl NewsConfig {
    /// Load news configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("NEWS_API_URL").unwrap_or_else(|_| DEFAULT_NEWS_API_URL.to_string());
        let query = std::env::var("NEWS_QUERY").unwrap_or_else(|_| DEFAULT_NEWS_QUERY.to_string());

        let request_timeout = std::env::var("NEWS_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_NEWS_TIMEOUT);

        let retry_pause = std::env::var("NEWS_RETRY_PAUSE_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_NEWS_RETRY_PAUSE);

        let max_retries = std::env::var("NEWS_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_NEWS_MAX_RETRIES);

        Self {
            base_url,
            query,
            request_timeout,
            retry_pause,
            max_retries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_defaults() {
        let config = StreamConfig::default();
        assert_eq!(config.base_url, "wss://stream.binance.com:9443/ws");
        assert_eq!(config.reconnect_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_news_defaults() {
        let config = NewsConfig::default();
        assert_eq!(config.base_url, "https://newsapi.org/v2/everything");
        assert_eq!(config.query, "crypto");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.retry_pause, Duration::from_millis(500));
        assert_eq!(config.max_retries, 1);
    }

    #[test]
    fn test_trade_stream_url_lowercases_key() {
        let config = StreamConfig::default();
        assert_eq!(
            config.trade_stream_url("BTCUSDT").as_deref(),
            Some("wss://stream.binance.com:9443/ws/btcusdt@trade")
        );
    }

    #[test]
    fn test_trade_stream_url_rejects_invalid_keys() {
        let config = StreamConfig::default();
        assert!(config.trade_stream_url("").is_none());
        assert!(config.trade_stream_url("btc usdt").is_none());
        assert!(config.trade_stream_url("btc/usdt").is_none());
        assert!(config.trade_stream_url("btc\nusdt").is_none());
    }
}
