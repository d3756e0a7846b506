//! Subcommand implementations

pub mod browse;
pub mod show;
pub mod update;

use anyhow::{Context as _, Result};
use petlovers_core::PetId;

/// Parse a pet id argument
pub(crate) fn parse_id(raw: &str) -> Result<PetId> {
    PetId::parse(raw).with_context(|| format!("'{}' is not a valid pet id", raw))
}
