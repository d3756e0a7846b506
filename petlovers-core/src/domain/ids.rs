use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Newtype for the backend's pet identifier (an opaque document id)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PetId(String);

impl PetId {
    /// Parse a pet id, rejecting empty or whitespace-only input
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(CoreError::Validation("Pet id cannot be empty".to_string()));
        }
        if trimmed.contains('/') {
            return Err(CoreError::Validation(format!(
                "Pet id cannot contain '/': {}",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PetId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<PetId> for String {
    fn from(id: PetId) -> Self {
        id.0
    }
}
