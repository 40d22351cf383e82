//! News fetch orchestration
//!
//! Thin layer over [`RetryingFetcher`](crate::fetch::RetryingFetcher): builds
//! the article-search request (query term, page size, recency sort, API-key
//! header) and decodes the article schema from the successful attempt.

pub mod types;

use crate::config::{Credentials, NewsConfig};
use crate::error::Result;
use crate::fetch::RetryingFetcher;
use tracing::debug;

// Re-export
pub use types::{NewsArticle, NewsResponse, NewsSource};

/// Page size for the small home-screen preview
pub const PREVIEW_PAGE_SIZE: u32 = 5;

/// Page size for the full latest-news list
pub const LATEST_PAGE_SIZE: u32 = 20;

/// Client for the article-search endpoint
///
/// Each fetch runs through the retrying executor with the configured retry
/// budget; the response status and body both come from the same successful
/// attempt. A response that cannot be decoded is a terminal
/// [`Parse`](crate::error::FeedError::Parse) error, since there is no partial
/// result to fall back to.
pub struct NewsClient {
    fetcher: RetryingFetcher,
    config: NewsConfig,
    credentials: Credentials,
}

impl NewsClient {
    /// Creates a news client with the given configuration and credentials.
    pub fn new(config: NewsConfig, credentials: Credentials) -> Self {
        let fetcher = RetryingFetcher::with_policy(config.request_timeout, config.retry_pause);

        Self {
            fetcher,
            config,
            credentials,
        }
    }

    /// Fetch a small preview of recent news.
    pub async fn fetch_preview(&self) -> Result<Vec<NewsArticle>> {
        self.fetch_page(PREVIEW_PAGE_SIZE).await
    }

    /// Fetch the latest full list of news.
    pub async fn fetch_latest(&self) -> Result<Vec<NewsArticle>> {
        self.fetch_page(LATEST_PAGE_SIZE).await
    }

    /// Fetch one page of articles sorted by publication time.
    async fn fetch_page(&self, page_size: u32) -> Result<Vec<NewsArticle>> {
        let page = page_size.to_string();
        let request = self
            .fetcher
            .client()
            .get(&self.config.base_url)
            .query(&[
                ("q", self.config.query.as_str()),
                ("pageSize", page.as_str()),
                ("sortBy", "publishedAt"),
            ])
            .header("X-Api-Key", self.credentials.api_key.expose_secret());

        debug!(query = %self.config.query, page_size, "Fetching news");

        let outcome = self.fetcher.fetch(request, self.config.max_retries).await?;
        let response: NewsResponse = serde_json::from_slice(&outcome.body)?;

        debug!(articles = response.articles.len(), "Fetched news page");
        Ok(response.articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_sizes() {
        assert_eq!(PREVIEW_PAGE_SIZE, 5);
        assert_eq!(LATEST_PAGE_SIZE, 20);
    }
}
