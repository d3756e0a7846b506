//! Pet update form model
//!
//! Holds the raw field values exactly as an input would produce them,
//! pre-populated from an existing [`Pet`]. Validation yields at most one
//! human-readable message per field, and a valid form is consolidated into a
//! [`PetUpdate`] payload on submit.

use crate::domain::{Pet, PetCategory, PetId, PetUpdate};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

const MAX_AGE_MONTHS: u32 = 600;
const SUBMIT_LABEL: &str = "Update Pet";

/// Named inputs of the update form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    PetName,
    PetAge,
    PetCategory,
    PetLocation,
    ShortDescription,
    LongDescription,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::PetName,
        FormField::PetAge,
        FormField::PetCategory,
        FormField::PetLocation,
        FormField::ShortDescription,
        FormField::LongDescription,
    ];

    /// Wire name of the field
    pub fn name(&self) -> &'static str {
        match self {
            FormField::PetName => "petName",
            FormField::PetAge => "petAge",
            FormField::PetCategory => "petCategory",
            FormField::PetLocation => "petLocation",
            FormField::ShortDescription => "shortDescription",
            FormField::LongDescription => "longDescription",
        }
    }

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            FormField::PetName => "Pet Name",
            FormField::PetAge => "Pet Age(month)",
            FormField::PetCategory => "Pet Category",
            FormField::PetLocation => "Pet Location",
            FormField::ShortDescription => "Short Description",
            FormField::LongDescription => "Long Description",
        }
    }

    fn from_struct_field(name: &str) -> Option<Self> {
        match name {
            "pet_name" => Some(FormField::PetName),
            "pet_age" => Some(FormField::PetAge),
            "pet_category" => Some(FormField::PetCategory),
            "pet_location" => Some(FormField::PetLocation),
            "short_description" => Some(FormField::ShortDescription),
            "long_description" => Some(FormField::LongDescription),
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-field error messages; a field absent from the map has no error
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<FormField, String>);

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", messages.join(", "))
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = BTreeMap::new();
        for (name, errs) in errors.field_errors() {
            let Some(field) = FormField::from_struct_field(&name) else {
                continue;
            };
            if let Some(first) = errs.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field.label()));
                fields.insert(field, message);
            }
        }
        FieldErrors(fields)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("An update is already in progress")]
    Busy,

    #[error("Form has invalid fields: {0}")]
    Invalid(FieldErrors),
}

/// Visual state of the submit button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitButton {
    Enabled { label: &'static str },
    /// Disabled, showing a spinner
    Busy,
}

impl SubmitButton {
    pub fn is_disabled(&self) -> bool {
        matches!(self, SubmitButton::Busy)
    }
}

#[derive(Debug, Clone, Validate)]
pub struct PetUpdateForm {
    pet_id: PetId,
    #[validate(
        custom(function = "not_blank", message = "Pet name is required"),
        length(max = 100, message = "Pet name must be at most 100 characters")
    )]
    pet_name: String,
    #[validate(custom(
        function = "age_in_range",
        message = "Pet age must be a whole number of months between 0 and 600"
    ))]
    pet_age: String,
    #[validate(custom(function = "known_category", message = "Choose one of the listed categories"))]
    pet_category: String,
    #[validate(
        custom(function = "not_blank", message = "Pet location is required"),
        length(max = 100, message = "Pet location must be at most 100 characters")
    )]
    pet_location: String,
    #[validate(
        custom(function = "not_blank", message = "Short description is required"),
        length(max = 300, message = "Short description must be at most 300 characters")
    )]
    short_description: String,
    #[validate(custom(function = "has_visible_text", message = "Long description is required"))]
    long_description: String,
    pet_image: Option<String>,
    is_loading: bool,
}

impl PetUpdateForm {
    /// Build a form pre-populated with the pet's current values
    pub fn from_pet(pet: &Pet) -> Self {
        Self {
            pet_id: pet.id.clone(),
            pet_name: pet.pet_name.clone(),
            pet_age: pet.pet_age.to_string(),
            pet_category: pet.pet_category.as_str().to_string(),
            pet_location: pet.pet_location.clone(),
            short_description: pet.short_description.clone(),
            long_description: pet.long_description.clone(),
            pet_image: pet.pet_image.clone(),
            is_loading: false,
        }
    }

    pub fn pet_id(&self) -> &PetId {
        &self.pet_id
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::PetName => &self.pet_name,
            FormField::PetAge => &self.pet_age,
            FormField::PetCategory => &self.pet_category,
            FormField::PetLocation => &self.pet_location,
            FormField::ShortDescription => &self.short_description,
            FormField::LongDescription => &self.long_description,
        }
    }

    /// Replace a field's raw value. `LongDescription` takes rich-text markup.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::PetName => self.pet_name = value,
            FormField::PetAge => self.pet_age = value,
            FormField::PetCategory => self.pet_category = value,
            FormField::PetLocation => self.pet_location = value,
            FormField::ShortDescription => self.short_description = value,
            FormField::LongDescription => self.long_description = value,
        }
    }

    /// Record the URL returned by the image host for a newly uploaded picture
    pub fn set_image(&mut self, url: impl Into<String>) {
        self.pet_image = Some(url.into());
    }

    pub fn image(&self) -> Option<&str> {
        self.pet_image.as_deref()
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn submit_button(&self) -> SubmitButton {
        if self.is_loading {
            SubmitButton::Busy
        } else {
            SubmitButton::Enabled {
                label: SUBMIT_LABEL,
            }
        }
    }

    pub fn errors(&self) -> FieldErrors {
        match self.validate() {
            Ok(()) => FieldErrors::default(),
            Err(errors) => errors.into(),
        }
    }

    pub fn error_for(&self, field: FormField) -> Option<String> {
        self.errors().get(field).map(str::to_string)
    }

    /// Consolidate the current values into an update payload
    pub fn to_payload(&self) -> Result<PetUpdate, FieldErrors> {
        self.validate().map_err(FieldErrors::from)?;

        let pet_age = parse_age(&self.pet_age).ok_or_else(FieldErrors::default)?;
        let pet_category = self
            .pet_category
            .parse::<PetCategory>()
            .map_err(|_| FieldErrors::default())?;

        Ok(PetUpdate {
            pet_name: self.pet_name.trim().to_string(),
            pet_age,
            pet_category,
            pet_location: self.pet_location.trim().to_string(),
            short_description: self.short_description.trim().to_string(),
            long_description: self.long_description.clone(),
            pet_image: self.pet_image.clone(),
        })
    }

    /// Validate, build the payload and hand it to `on_submit`
    pub fn handle_submit<R>(
        &self,
        on_submit: impl FnOnce(PetUpdate) -> R,
    ) -> Result<R, SubmitError> {
        if self.is_loading {
            return Err(SubmitError::Busy);
        }
        let payload = self.to_payload().map_err(SubmitError::Invalid)?;
        Ok(on_submit(payload))
    }
}

/// Visible text of rich-text markup: tags removed, common entities decoded
pub fn plain_text(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_age(value: &str) -> Option<u32> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|age| *age <= MAX_AGE_MONTHS)
}

fn invalid(code: &'static str) -> ValidationError {
    ValidationError::new(code)
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required"));
    }
    Ok(())
}

fn age_in_range(value: &str) -> Result<(), ValidationError> {
    match parse_age(value) {
        Some(_) => Ok(()),
        None => {
            let mut error = invalid("age");
            error.add_param(Cow::Borrowed("value"), &value);
            Err(error)
        }
    }
}

fn known_category(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<PetCategory>()
        .map(|_| ())
        .map_err(|_| invalid("category"))
}

fn has_visible_text(value: &str) -> Result<(), ValidationError> {
    if plain_text(value).is_empty() {
        return Err(invalid("required"));
    }
    Ok(())
}
