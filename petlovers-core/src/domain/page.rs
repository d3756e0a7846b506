use crate::domain::pet::{Pet, PetCategory};
use serde::{Deserialize, Serialize};

/// One page of the available-pets listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PetPage {
    #[serde(default)]
    pub pets: Vec<Pet>,
    /// Cursor for the following page; absent once the listing is exhausted
    #[serde(default)]
    pub next_page: Option<u32>,
}

impl PetPage {
    pub fn new(pets: Vec<Pet>, next_page: Option<u32>) -> Self {
        Self { pets, next_page }
    }
}

/// The (search, category) pair that scopes one pagination sequence
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterKey {
    pub search: String,
    pub category: Option<PetCategory>,
}

impl FilterKey {
    pub fn new(search: impl Into<String>, category: Option<PetCategory>) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    /// Value sent as the `category` query parameter (empty for all categories)
    pub fn category_param(&self) -> &'static str {
        self.category.map(|c| c.as_str()).unwrap_or("")
    }
}
