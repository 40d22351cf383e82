//! API Credential Management
//!
//! Handling of the news API key loaded from environment variables.
//! The key is never logged in full and is masked when displayed.

use std::fmt;

/// Secure string wrapper that masks sensitive data in logs
///
/// Debug output shows only `SecretString(***)` and Display shows the
/// truncated form `first4...last4`.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(value: String) -> Self {
        SecretString(value)
    }

    /// Returns the inner string. Only use this when the value is actually
    /// needed for a request header; never log the returned value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns a masked form safe for logging (`first4...last4`).
    pub fn masked(&self) -> String {
        let s = &self.0;
        if s.len() <= 8 {
            return "***".to_string();
        }
        format!("{}...{}", &s[..4], &s[s.len() - 4..])
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString(***)")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString::new(s)
    }
}

/// News API credentials loaded from environment variables
///
/// Stored as [`SecretString`] to prevent accidental logging.
#[derive(Clone, Debug)]
pub struct Credentials {
    /// News API key, sent in the `X-Api-Key` request header
    pub api_key: SecretString,
}

impl Credentials {
    /// Loads credentials from the `NEWS_API_KEY` environment variable.
    ///
    /// Trims whitespace and validates non-empty.
    pub fn from_env() -> Result<Self, String> {
        let api_key = std::env::var("NEWS_API_KEY")
            .map_err(|_| "NEWS_API_KEY not set".to_string())?;

        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err("NEWS_API_KEY is empty after trimming whitespace".to_string());
        }

        Ok(Self {
            api_key: SecretString::new(api_key),
        })
    }

    /// Builds credentials from a known key, for callers that configure the
    /// key some other way.
    pub fn new(api_key: String) -> Self {
        Self {
            api_key: SecretString::new(api_key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_long_secret() {
        let secret = SecretString::new("46517a8f35a34c0e88e7c2cc31f63fac".to_string());
        assert_eq!(secret.masked(), "4651...3fac");
    }

    #[test]
    fn test_masked_short_secret() {
        let secret = SecretString::new("abc".to_string());
        assert_eq!(secret.masked(), "***");
    }

    #[test]
    fn test_debug_never_exposes_value() {
        let secret = SecretString::new("super-secret-value".to_string());
        assert_eq!(format!("{:?}", secret), "SecretString(***)");
    }
}
