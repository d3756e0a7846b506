//! Editing a pet listing
//!
//! The form is prefilled from the server, the given flags overwrite single
//! fields, and the result is validated before anything is sent.

use anyhow::{Context as _, Result};
use clap::Args;
use petlovers_core::{FormField, PetUpdateForm, SubmitButton, SubmitError};

use super::parse_id;
use crate::context::Context;

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Pet ID
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New age in months
    #[arg(long)]
    pub age: Option<String>,

    /// New category
    #[arg(long)]
    pub category: Option<String>,

    /// New location
    #[arg(long)]
    pub location: Option<String>,

    /// New short description
    #[arg(long)]
    pub short: Option<String>,

    /// New long description (HTML allowed)
    #[arg(long)]
    pub long: Option<String>,

    /// URL of an already uploaded image
    #[arg(long)]
    pub image: Option<String>,

    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

impl UpdateArgs {
    fn overrides(&self) -> impl Iterator<Item = (FormField, &str)> {
        [
            (FormField::PetName, &self.name),
            (FormField::PetAge, &self.age),
            (FormField::PetCategory, &self.category),
            (FormField::PetLocation, &self.location),
            (FormField::ShortDescription, &self.short),
            (FormField::LongDescription, &self.long),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    }

    fn is_empty(&self) -> bool {
        self.overrides().next().is_none() && self.image.is_none()
    }
}

pub async fn execute(ctx: &Context, args: UpdateArgs) -> Result<()> {
    let id = parse_id(&args.id)?;
    if args.is_empty() {
        ctx.output.warning("Nothing to change; pass at least one field flag");
        return Ok(());
    }

    let client = ctx.create_client()?;
    let pet = client
        .pets()
        .get(&id)
        .await
        .with_context(|| format!("Failed to fetch pet {}", id))?;

    let mut form = PetUpdateForm::from_pet(&pet);
    for (field, value) in args.overrides() {
        form.set(field, value);
    }
    if let Some(ref url) = args.image {
        form.set_image(url.as_str());
    }

    let errors = form.errors();
    if !errors.is_empty() {
        for (field, message) in errors.iter() {
            ctx.output.error(&format!("{}: {}", field.label(), message));
        }
        anyhow::bail!("{} field(s) need attention", errors.len());
    }

    if !args.yes && ctx.output.is_interactive() {
        let label = match form.submit_button() {
            SubmitButton::Enabled { label } => label,
            SubmitButton::Busy => anyhow::bail!("An update is already in progress"),
        };
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!("{} {}?", label, pet.pet_name))
            .default(true)
            .interact()
            .context("Failed to get confirmation")?;

        if !confirm {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    let pets = client.pets();
    let request = form
        .handle_submit(|payload| {
            let id = id.clone();
            async move { pets.update(&id, &payload).await }
        })
        .map_err(|e| match e {
            SubmitError::Invalid(errors) => anyhow::anyhow!("Form has invalid fields: {}", errors),
            SubmitError::Busy => anyhow::anyhow!("An update is already in progress"),
        })?;

    form.set_loading(true);
    let spinner = ctx.output.spinner("Updating pet...");
    let result = request.await;
    form.set_loading(false);
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let outcome = result.with_context(|| format!("Failed to update pet {}", id))?;
    if outcome.matched() {
        tracing::info!(pet = %id, modified = outcome.modified_count, "Pet updated");
        ctx.output.success("Pet updated");
    } else {
        ctx.output.warning(&format!("No pet matched {}; nothing was changed", id));
    }
    Ok(())
}
