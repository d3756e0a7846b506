//! PetLoversHub SDK
//!
//! This crate provides a Rust client for the PetLoversHub adoption API:
//! the paginated available-pets listing, pet details, and pet updates, plus
//! an async driver that runs the infinite-scroll listing loop against it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use petlovers_sdk::{PetListing, PetLoversClient, SdkConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PetLoversClient::new(SdkConfig::new("http://localhost:5000"))?;
//!     let listing = PetListing::new(client.pets().clone());
//!
//!     listing.load_initial().await;
//!     while !listing.snapshot().end_of_results {
//!         if listing.sentinel_visible().await.is_none() {
//!             break;
//!         }
//!     }
//!     println!("{} pets available", listing.snapshot().pets.len());
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Requests fail with [`SdkError`]. Inside the listing loop those are folded
//! into [`petlovers_core::FetchError`] and surfaced through the snapshot
//! instead of being returned:
//!
//! ```rust,no_run
//! use petlovers_sdk::{PetLoversClient, SdkError};
//! use petlovers_core::PetId;
//!
//! async fn show(client: &PetLoversClient, id: &PetId) {
//!     match client.pets().get(id).await {
//!         Ok(pet) => println!("{} ({} months)", pet.pet_name, pet.pet_age),
//!         Err(SdkError::NotFound(msg)) => eprintln!("No such pet: {}", msg),
//!         Err(e) => eprintln!("Other error: {}", e),
//!     }
//! }
//! ```

#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod listing;
pub mod resources;

pub use client::HttpClient;
pub use config::{SdkConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{SdkError, SdkResult};
pub use listing::{ListingSnapshot, PetListing};
pub use resources::pets::{AvailablePetsQuery, PetsClient, UpdateOutcome};

use std::sync::Arc;

/// The main client for the PetLoversHub API.
///
/// # Example
///
/// ```rust,no_run
/// use petlovers_sdk::{PetLoversClient, SdkConfig};
///
/// let client = PetLoversClient::new(
///     SdkConfig::new("https://api.example.com").with_bearer_token("token"),
/// )?;
/// let pets = client.pets();
/// # Ok::<(), petlovers_sdk::SdkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PetLoversClient {
    http_client: Arc<HttpClient>,
    pets: PetsClient,
}

impl PetLoversClient {
    /// Create a new client with the given configuration.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: SdkConfig) -> SdkResult<Self> {
        let http_client = Arc::new(HttpClient::new(config)?);

        Ok(Self {
            pets: PetsClient::new(Arc::clone(&http_client)),
            http_client,
        })
    }

    /// Create a new client using a builder pattern.
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    /// Get the pets client
    pub fn pets(&self) -> &PetsClient {
        &self.pets
    }

    /// Start an infinite-scroll listing backed by this client
    pub fn listing(&self) -> PetListing<PetsClient> {
        PetListing::new(self.pets.clone())
    }

    /// Get a reference to the underlying HTTP client.
    pub fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// Get the base URL of the API.
    pub fn base_url(&self) -> &str {
        &self.http_client.config().base_url
    }
}

/// Builder for creating a PetLoversClient with fluent configuration.
#[derive(Debug)]
pub struct ClientBuilder {
    config: SdkConfig,
}

impl ClientBuilder {
    /// Create a new client builder with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            config: SdkConfig::new(base_url),
        }
    }

    /// Send `Authorization: Bearer <token>` with every request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.config = self.config.with_bearer_token(token);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.config = self.config.with_max_retries(max_retries);
        self
    }

    /// Enable or disable request/response body logging.
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.config = self.config.with_logging(enable);
        self
    }

    /// Build the client.
    pub fn build(self) -> SdkResult<PetLoversClient> {
        PetLoversClient::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let result = PetLoversClient::builder("https://api.example.com")
            .with_bearer_token("token")
            .with_timeout(std::time::Duration::from_secs(30))
            .with_max_retries(1)
            .with_logging(true)
            .build();

        assert!(result.is_ok());
        let client = result.unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
        assert_eq!(client.http_client().config().max_retries, 1);
        assert_eq!(
            client.http_client().config().authorization().as_deref(),
            Some("Bearer token")
        );
    }

    #[test]
    fn test_client_rejects_bad_url() {
        let result = PetLoversClient::new(SdkConfig::new("localhost:5000"));
        assert!(result.is_err());
    }
}
