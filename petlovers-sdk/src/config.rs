//! Connection settings for the PetLoversHub API

use crate::error::{SdkError, SdkResult};
use std::time::Duration;
use url::Url;

/// Default backend location used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkConfig {
    /// Backend root, e.g. `https://api.petlovershub.com`
    pub base_url: String,

    /// Bearer token from the site's auth provider, sent on every request
    pub token: Option<String>,

    pub timeout: Duration,

    /// Extra attempts for 5xx, 429 and connection failures (0 = fail on first error)
    pub max_retries: u32,

    /// Log request and response bodies at debug level
    pub log_bodies: bool,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl SdkConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            max_retries: 0,
            log_bodies: false,
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_logging(mut self, enable: bool) -> Self {
        self.log_bodies = enable;
        self
    }

    /// `Authorization` header value, if a token is configured
    pub fn authorization(&self) -> Option<String> {
        self.token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .map(|token| format!("Bearer {}", token.trim()))
    }

    /// Check the settings and return the parsed base URL
    pub fn validate(&self) -> SdkResult<Url> {
        if self.base_url.trim().is_empty() {
            return Err(SdkError::ConfigurationError(
                "Base URL cannot be empty".to_string(),
            ));
        }

        let url = Url::parse(self.base_url.trim())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SdkError::ConfigurationError(format!(
                "Unsupported URL scheme: {}",
                url.scheme()
            )));
        }

        if self.timeout.is_zero() {
            return Err(SdkError::ConfigurationError(
                "Timeout cannot be zero".to_string(),
            ));
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SdkConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.authorization(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bearer_token_header() {
        let config = SdkConfig::new("https://api.example.com").with_bearer_token("my-token");
        assert_eq!(config.authorization().as_deref(), Some("Bearer my-token"));

        let blank = SdkConfig::new("https://api.example.com").with_bearer_token("  ");
        assert_eq!(blank.authorization(), None);
    }

    #[test]
    fn test_invalid_config() {
        assert!(SdkConfig::new("").validate().is_err());
        assert!(SdkConfig::new("not a url").validate().is_err());
        assert!(SdkConfig::new("localhost:5000").validate().is_err());
        assert!(SdkConfig::new("ftp://example.com").validate().is_err());
        assert!(SdkConfig::new("https://example.com")
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }
}
