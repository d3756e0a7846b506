//! Infinite-scroll browsing of available pets
//!
//! Every "show more" confirmation stands in for the sentinel element coming
//! into view. With `--all`, or in a non-table output format, the sentinel is
//! treated as permanently visible and pages are fetched until the server
//! reports the end.

use anyhow::{Context as _, Result};
use clap::Args;
use petlovers_core::{Completion, FilterKey, ListingPhase, PetCategory};
use petlovers_sdk::{PetListing, PetsClient};

use crate::context::Context;
use crate::output::{OutputFormat, LOADING_MORE};

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Free-text search
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Restrict to one category (Cat, Bird, Rabbit, Dog, Fish, Other)
    #[arg(short, long, value_parser = parse_category)]
    pub category: Option<PetCategory>,

    /// Keep fetching until every page is shown
    #[arg(short, long)]
    pub all: bool,
}

fn parse_category(raw: &str) -> std::result::Result<PetCategory, String> {
    raw.parse().map_err(|e: petlovers_core::CoreError| e.to_string())
}

impl BrowseArgs {
    /// Search text is sent exactly as typed
    fn filter_key(&self) -> FilterKey {
        FilterKey::new(self.search.as_str(), self.category)
    }
}

pub async fn execute(ctx: &Context, args: BrowseArgs) -> Result<()> {
    let client = ctx.create_client()?;
    let listing = PetListing::with_sizing(client.pets().clone(), ctx.config.page_sizing());
    let filter = args.filter_key();
    let auto = args.all || !ctx.output.is_interactive();

    let mut shown = 0;
    let mut collected = Vec::new();

    let skeletons = listing.snapshot().skeletons;
    let spinner = ctx.output.spinner(&format!("Loading {} pets...", skeletons));
    let completion = match listing.set_filter(filter).await {
        Some(completion) => Some(completion),
        None => listing.load_initial().await,
    };
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    report(ctx, &listing, completion.as_ref(), &mut shown, &mut collected)?;

    loop {
        let snapshot = listing.snapshot();
        if snapshot.end_of_results {
            break;
        }
        if snapshot.error.is_some() && auto {
            // Nobody to ask whether to retry.
            break;
        }
        if !auto && !want_more(snapshot.error.is_some())? {
            break;
        }

        let spinner = if snapshot.phase == ListingPhase::LoadingInitial {
            ctx.output.spinner(&format!("Loading {} pets...", snapshot.skeletons))
        } else {
            ctx.output.spinner(LOADING_MORE)
        };
        let completion = listing.sentinel_visible().await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        if completion.is_none() {
            break;
        }
        report(ctx, &listing, completion.as_ref(), &mut shown, &mut collected)?;
    }

    if ctx.output.format() == OutputFormat::Json {
        ctx.output.write_cards(&collected)?;
    }

    let snapshot = listing.snapshot();
    if snapshot.end_of_results {
        if snapshot.pets.is_empty() {
            ctx.output.info("No pets match this search");
        } else {
            ctx.output.end_of_results();
        }
    }

    match snapshot.error {
        Some(error) if auto => Err(anyhow::Error::new(error).context("Listing stopped early")),
        _ => Ok(()),
    }
}

/// Print whatever a completion added since the last report
fn report(
    ctx: &Context,
    listing: &PetListing<PetsClient>,
    completion: Option<&Completion>,
    shown: &mut usize,
    collected: &mut Vec<petlovers_core::Pet>,
) -> Result<()> {
    match completion {
        Some(Completion::Appended { page, items, next_page }) => {
            tracing::debug!(page, items, ?next_page, "Page appended");
            let fresh: Vec<_> = listing.inspect(|state| state.pets().skip(*shown).cloned().collect());
            *shown += fresh.len();
            if ctx.output.format() == OutputFormat::Json {
                collected.extend(fresh);
            } else {
                ctx.output.write_cards(&fresh)?;
            }
        }
        Some(Completion::Failed(error)) => ctx.output.fetch_failed(error),
        Some(Completion::Stale) | None => {}
    }
    Ok(())
}

fn want_more(after_error: bool) -> Result<bool> {
    let prompt = if after_error { "Try again?" } else { "Show more pets?" };
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .context("Failed to get confirmation")
}
