//! CLI configuration management

use anyhow::{Context as _, Result};
use config::{Config as ConfigLoader, Environment, File};
use petlovers_core::listing::{PageSizing, CONTINUATION_PAGE_SIZE, INITIAL_PAGE_SIZE};
use petlovers_sdk::DEFAULT_BASE_URL;
use serde::Deserialize;
use std::time::Duration;

/// Environment variable prefix, e.g. `PETLOVERS_API_URL`
pub const ENV_PREFIX: &str = "PETLOVERS";

/// CLI configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    /// API base URL
    pub api_url: String,

    /// Bearer token sent with every request
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Retries for 5xx responses and rate limiting
    pub max_retries: u32,

    /// Page size of the first listing request
    pub initial_page_size: u32,

    /// Page size once the listing has been scrolled
    pub continuation_page_size: u32,

    /// Default log filter when neither `RUST_LOG` nor `-v` is given
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout_secs: 30,
            max_retries: 0,
            initial_page_size: INITIAL_PAGE_SIZE,
            continuation_page_size: CONTINUATION_PAGE_SIZE,
            log_level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Load `config/default`, `config/local` and `PETLOVERS_*` variables, in that order
    pub fn load() -> Result<Self> {
        let config = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read configuration")?;

        let config: CliConfig = config
            .try_deserialize()
            .context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_page_size == 0 || self.continuation_page_size == 0 {
            anyhow::bail!("Page sizes must be greater than zero");
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn page_sizing(&self) -> PageSizing {
        PageSizing {
            initial: self.initial_page_size,
            continuation: self.continuation_page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_listing_sizes() {
        let config = CliConfig::default();
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.page_sizing(), PageSizing::default());
        assert_eq!(config.max_retries, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_source_keeps_defaults() {
        let config: CliConfig = ConfigLoader::builder()
            .add_source(config::File::from_str(
                "api_url = \"https://pets.example.com\"\ncontinuation_page_size = 6",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.api_url, "https://pets.example.com");
        assert_eq!(config.continuation_page_size, 6);
        assert_eq!(config.initial_page_size, 10);
        assert_eq!(config.token, None);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let config = CliConfig {
            continuation_page_size: 0,
            ..CliConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
