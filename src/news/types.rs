//! News API response types
//!
//! Types for the article-search endpoint. The response is a JSON object with
//! an `articles` array; fields the client does not use are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response envelope from the article-search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    /// Reported request status (e.g. "ok")
    #[serde(default)]
    pub status: Option<String>,

    /// Total result count across all pages
    #[serde(default)]
    pub total_results: Option<u64>,

    /// Articles on this page, most recent first
    #[serde(default)]
    pub articles: Vec<NewsArticle>,
}

/// A single news article
///
/// Example JSON:
/// ```json
/// {
///   "source": { "id": null, "name": "Example Wire" },
///   "title": "Markets rally",
///   "description": "A short summary",
///   "url": "https://example.com/story",
///   "urlToImage": "https://example.com/story.jpg",
///   "publishedAt": "2025-05-26T10:30:00Z"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    /// Headline
    pub title: String,

    /// Optional summary
    #[serde(default)]
    pub description: Option<String>,

    /// Link to the full article
    pub url: String,

    /// Optional image URL
    #[serde(default)]
    pub url_to_image: Option<String>,

    /// ISO-8601 publication timestamp
    pub published_at: DateTime<Utc>,

    /// Publishing outlet
    #[serde(default)]
    pub source: NewsSource,
}

/// Publishing outlet of an article
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsSource {
    /// Stable source identifier, absent for most outlets
    #[serde(default)]
    pub id: Option<String>,

    /// Display name of the outlet
    #[serde(default = "default_source_name")]
    pub name: String,
}

impl Default for NewsSource {
    fn default() -> Self {
        Self {
            id: None,
            name: default_source_name(),
        }
    }
}

fn default_source_name() -> String {
    "Unknown Source".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_deserialization() {
        let json = r#"{
            "source": { "id": null, "name": "Example Wire" },
            "author": "A. Reporter",
            "title": "Markets rally",
            "description": "A short summary",
            "url": "https://example.com/story",
            "urlToImage": "https://example.com/story.jpg",
            "publishedAt": "2025-05-26T10:30:00Z",
            "content": "Full text elided"
        }"#;

        let article: NewsArticle = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Markets rally");
        assert_eq!(article.description.as_deref(), Some("A short summary"));
        assert_eq!(article.url, "https://example.com/story");
        assert_eq!(
            article.url_to_image.as_deref(),
            Some("https://example.com/story.jpg")
        );
        assert_eq!(article.source.name, "Example Wire");
        assert_eq!(article.published_at.timestamp(), 1748255400);
    }

    #[test]
    fn test_article_optional_fields_absent() {
        let json = r#"{
            "title": "Bare minimum",
            "url": "https://example.com/bare",
            "publishedAt": "2025-05-26T00:00:00Z"
        }"#;

        let article: NewsArticle = serde_json::from_str(json).unwrap();
        assert!(article.description.is_none());
        assert!(article.url_to_image.is_none());
        assert_eq!(article.source.name, "Unknown Source");
    }

    #[test]
    fn test_article_rejects_bad_timestamp() {
        let json = r#"{
            "title": "Bad date",
            "url": "https://example.com/bad",
            "publishedAt": "yesterday-ish"
        }"#;

        assert!(serde_json::from_str::<NewsArticle>(json).is_err());
    }

    #[test]
    fn test_response_envelope_deserialization() {
        let json = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {
                    "title": "One",
                    "url": "https://example.com/1",
                    "publishedAt": "2025-05-26T10:30:00Z"
                },
                {
                    "title": "Two",
                    "url": "https://example.com/2",
                    "publishedAt": "2025-05-26T09:00:00Z"
                }
            ]
        }"#;

        let response: NewsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status.as_deref(), Some("ok"));
        assert_eq!(response.total_results, Some(2));
        assert_eq!(response.articles.len(), 2);
        assert_eq!(response.articles[0].title, "One");
    }

    #[test]
    fn test_empty_envelope_defaults() {
        let response: NewsResponse = serde_json::from_str("{}").unwrap();
        assert!(response.articles.is_empty());
    }
}
