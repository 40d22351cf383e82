use thiserror::Error;

/// Main error type for the feed client
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request failed with status {0}")]
    Status(reqwest::StatusCode),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request cancelled")]
    Cancelled,
}

impl FeedError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Transport failures and non-2xx responses are transient; cancellation
    /// and malformed requests/payloads are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FeedError::Connection(_) | FeedError::Status(_))
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            FeedError::Connection(_) => "connection_error",
            FeedError::Status(_) => "http_status",
            FeedError::Parse(_) => "parse_error",
            FeedError::InvalidRequest(_) => "invalid_request",
            FeedError::Cancelled => "cancelled",
        }
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Connection("Request timed out".to_string())
        } else if err.is_connect() {
            FeedError::Connection(format!("Failed to connect: {}", err))
        } else if err.is_builder() {
            FeedError::InvalidRequest(err.to_string())
        } else {
            FeedError::Connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Parse(format!("JSON parsing failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(FeedError::Connection("reset".into()).is_retryable());
        assert!(FeedError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR).is_retryable());
        assert!(!FeedError::Cancelled.is_retryable());
        assert!(!FeedError::Parse("bad json".into()).is_retryable());
        assert!(!FeedError::InvalidRequest("no body".into()).is_retryable());
    }

    #[test]
    fn test_json_error_maps_to_parse() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let mapped = FeedError::from(err);
        assert_eq!(mapped.error_type(), "parse_error");
    }
}
