//! CLI execution context

use anyhow::{Context as _, Result};
use petlovers_sdk::{PetLoversClient, SdkConfig};

use crate::config::CliConfig;
use crate::output::OutputWriter;
use crate::Cli;

/// Execution context for CLI commands
pub struct Context {
    /// Layered configuration with CLI overrides applied
    pub config: CliConfig,

    /// Output writer
    pub output: OutputWriter,

    /// Verbose mode
    pub verbose: bool,
}

impl Context {
    /// Create a new context from CLI arguments and the loaded configuration
    pub fn new(cli: &Cli, mut config: CliConfig) -> Self {
        if let Some(ref url) = cli.api_url {
            config.api_url = url.clone();
        }
        if let Some(ref token) = cli.token {
            config.token = Some(token.clone());
        }

        Self {
            config,
            output: OutputWriter::new(cli.output, cli.no_color),
            verbose: cli.verbose,
        }
    }

    /// Build the SDK configuration from the effective settings
    pub fn sdk_config(&self) -> SdkConfig {
        let mut sdk = SdkConfig::new(&self.config.api_url)
            .with_timeout(self.config.timeout())
            .with_max_retries(self.config.max_retries)
            .with_logging(self.verbose);

        if let Some(ref token) = self.config.token {
            sdk = sdk.with_bearer_token(token);
        }
        sdk
    }

    /// Create an SDK client
    pub fn create_client(&self) -> Result<PetLoversClient> {
        PetLoversClient::new(self.sdk_config())
            .with_context(|| format!("Invalid API configuration for {}", self.config.api_url))
    }
}
