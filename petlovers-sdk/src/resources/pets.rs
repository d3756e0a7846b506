//! Pets resource client
//!
//! This module provides the available-pets listing, pet details and pet
//! updates.

use crate::client::HttpClient;
use crate::error::SdkResult;
use async_trait::async_trait;
use petlovers_core::domain::{Pet, PetCategory, PetId, PetPage, PetUpdate};
use petlovers_core::error::FetchError;
use petlovers_core::listing::PageRequest;
use petlovers_core::traits::PageFetcher;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Path of the paginated listing endpoint
pub const AVAILABLE_PETS_PATH: &str = "/available-pets";

/// Client for pet operations
#[derive(Debug, Clone)]
pub struct PetsClient {
    client: Arc<HttpClient>,
}

impl PetsClient {
    /// Create a new pets client
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// Fetch one page of pets available for adoption
    pub async fn available_pets(&self, query: &AvailablePetsQuery) -> SdkResult<PetPage> {
        debug!(
            search = %query.search,
            category = %query.category,
            page = query.page,
            limit = query.limit,
            "Fetching available pets"
        );
        self.client.get_with_query(AVAILABLE_PETS_PATH, query).await
    }

    /// Get a pet by ID
    pub async fn get(&self, id: &PetId) -> SdkResult<Pet> {
        self.client.get(&format!("/pets/{}", id)).await
    }

    /// Replace a pet's editable fields
    pub async fn update(&self, id: &PetId, update: &PetUpdate) -> SdkResult<UpdateOutcome> {
        self.client.put(&format!("/pets/{}", id), update).await
    }
}

#[async_trait]
impl PageFetcher for PetsClient {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PetPage, FetchError> {
        self.available_pets(&AvailablePetsQuery::from(request))
            .await
            .map_err(FetchError::from)
    }
}

/// Query parameters of `GET /available-pets`.
///
/// Every parameter is always sent; an empty `search` or `category` means
/// "no filter".
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AvailablePetsQuery {
    pub search: String,
    pub category: String,
    pub page: u32,
    pub limit: u32,
}

impl Default for AvailablePetsQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: String::new(),
            page: 0,
            limit: petlovers_core::listing::INITIAL_PAGE_SIZE,
        }
    }
}

impl AvailablePetsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: Option<PetCategory>) -> Self {
        self.category = category.map(|c| c.as_str().to_string()).unwrap_or_default();
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}

impl From<&PageRequest> for AvailablePetsQuery {
    fn from(request: &PageRequest) -> Self {
        Self {
            search: request.search.clone(),
            category: request.category_param().to_string(),
            page: request.page,
            limit: request.limit,
        }
    }
}

/// Acknowledgement returned by the update endpoint
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub matched_count: u64,
    #[serde(default)]
    pub modified_count: u64,
}

impl UpdateOutcome {
    /// Whether the backend found the pet (it may still report no field changes)
    pub fn matched(&self) -> bool {
        self.acknowledged && self.matched_count > 0
    }
}
