use crate::domain::PetPage;
use crate::error::FetchError;
use crate::listing::PageRequest;
use async_trait::async_trait;

/// Source of listing pages. The HTTP client implements this in production.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> Result<PetPage, FetchError>;
}
