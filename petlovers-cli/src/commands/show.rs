//! Pet details

use anyhow::{Context as _, Result};
use clap::Args;

use super::parse_id;
use crate::context::Context;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Pet ID
    pub id: String,
}

pub async fn execute(ctx: &Context, args: ShowArgs) -> Result<()> {
    let id = parse_id(&args.id)?;
    let client = ctx.create_client()?;

    let spinner = ctx.output.spinner("Fetching pet...");
    let result = client.pets().get(&id).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let pet = result.with_context(|| format!("Failed to fetch pet {}", id))?;
    ctx.output.write_pet(&pet)
}
