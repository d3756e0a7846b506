use crate::domain::ids::PetId;
use crate::error::CoreError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Fixed set of categories offered by the marketplace
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PetCategory {
    Cat,
    Bird,
    Rabbit,
    Dog,
    Fish,
    #[default]
    Other,
}

impl PetCategory {
    /// All categories in the order the category picker lists them
    pub const ALL: [PetCategory; 6] = [
        PetCategory::Cat,
        PetCategory::Bird,
        PetCategory::Rabbit,
        PetCategory::Dog,
        PetCategory::Fish,
        PetCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PetCategory::Cat => "Cat",
            PetCategory::Bird => "Bird",
            PetCategory::Rabbit => "Rabbit",
            PetCategory::Dog => "Dog",
            PetCategory::Fish => "Fish",
            PetCategory::Other => "Other",
        }
    }

    /// Parse an optional category filter. The empty string means "all categories".
    pub fn parse_filter(value: &str) -> Result<Option<Self>, CoreError> {
        let value = value.trim();
        if value.is_empty() {
            Ok(None)
        } else {
            value.parse().map(Some)
        }
    }
}

impl fmt::Display for PetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PetCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PetCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

// Records are display data: a category outside the picker's list is shown as
// `Other` rather than failing the page it arrived in.
impl<'de> Deserialize<'de> for PetCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(raw.parse().unwrap_or_else(|_| {
            warn!(category = %raw, "Unrecognised pet category, showing as Other");
            PetCategory::Other
        }))
    }
}

/// A pet listing as returned by the backend
///
/// Only the id is required. Everything else is display data and decodes
/// leniently, so one odd record never fails the page it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    #[serde(rename = "_id")]
    pub id: PetId,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub pet_name: String,
    /// Age in months
    #[serde(default, deserialize_with = "age_in_months")]
    pub pet_age: u32,
    #[serde(default)]
    pub pet_category: PetCategory,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub pet_location: String,
    #[serde(default)]
    pub pet_image: Option<String>,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub short_description: String,
    /// Rich-text markup
    #[serde(default, deserialize_with = "text_or_empty")]
    pub long_description: String,
    #[serde(default)]
    pub adopted: bool,
}

/// Consolidated payload produced by the update form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetUpdate {
    pub pet_name: String,
    pub pet_age: u32,
    pub pet_category: PetCategory,
    pub pet_location: String,
    pub short_description: String,
    pub long_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pet_image: Option<String>,
}

fn text_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Form submissions store the age as whatever the number input produced, so
// records hold integers, fractions or numeric strings. Fractions round to the
// nearest month; anything unreadable shows as 0.
fn age_in_months<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAge {
        Number(f64),
        Text(String),
        Unreadable(serde::de::IgnoredAny),
    }

    let months = match RawAge::deserialize(deserializer)? {
        RawAge::Number(age) => Some(age),
        RawAge::Text(text) => text.trim().parse::<f64>().ok(),
        RawAge::Unreadable(_) => None,
    };

    Ok(match months {
        Some(age) if age.is_finite() && age >= 0.0 => age.round().min(u32::MAX as f64) as u32,
        other => {
            warn!(age = ?other, "Unreadable pet age, showing as 0");
            0
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_from_str_is_case_insensitive() {
        assert_eq!("dog".parse::<PetCategory>().unwrap(), PetCategory::Dog);
        assert_eq!(" Fish ".parse::<PetCategory>().unwrap(), PetCategory::Fish);
        assert!("Dragon".parse::<PetCategory>().is_err());
    }

    #[test]
    fn test_parse_filter_empty_means_all() {
        assert_eq!(PetCategory::parse_filter("").unwrap(), None);
        assert_eq!(
            PetCategory::parse_filter("Rabbit").unwrap(),
            Some(PetCategory::Rabbit)
        );
    }

    #[test]
    fn test_pet_age_accepts_numeric_string() {
        let pet: Pet = serde_json::from_value(json!({
            "_id": "abc",
            "petName": "Milo",
            "petAge": "14",
            "petCategory": "Cat",
            "petLocation": "Dhaka"
        }))
        .unwrap();

        assert_eq!(pet.pet_age, 14);
        assert_eq!(pet.pet_image, None);
        assert!(!pet.adopted);
    }

    #[test]
    fn test_pet_age_is_lenient() {
        let age = |value: serde_json::Value| {
            serde_json::from_value::<Pet>(json!({ "_id": "abc", "petAge": value }))
                .unwrap()
                .pet_age
        };

        assert_eq!(age(json!(2.5)), 3);
        assert_eq!(age(json!("7.4")), 7);
        assert_eq!(age(json!("two")), 0);
        assert_eq!(age(json!(-4)), 0);
        assert_eq!(age(json!(null)), 0);
        assert_eq!(age(json!({ "months": 3 })), 0);
    }

    #[test]
    fn test_category_decodes_case_insensitively() {
        let category = |value: serde_json::Value| {
            serde_json::from_value::<Pet>(json!({ "_id": "abc", "petCategory": value }))
                .unwrap()
                .pet_category
        };

        assert_eq!(category(json!("cat")), PetCategory::Cat);
        assert_eq!(category(json!("DOG")), PetCategory::Dog);
        assert_eq!(category(json!("Hamster")), PetCategory::Other);
        assert_eq!(category(json!(null)), PetCategory::Other);
    }

    #[test]
    fn test_missing_display_fields_default() {
        let pet: Pet = serde_json::from_value(json!({
            "_id": "abc",
            "petName": null,
            "longDescription": null
        }))
        .unwrap();

        assert_eq!(pet.pet_name, "");
        assert_eq!(pet.pet_location, "");
        assert_eq!(pet.pet_category, PetCategory::Other);
        assert_eq!(pet.pet_age, 0);
        assert_eq!(pet.long_description, "");
    }

    #[test]
    fn test_page_with_odd_record_still_decodes() {
        let page: crate::domain::PetPage = serde_json::from_value(json!({
            "pets": [
                { "_id": "a", "petName": "Milo", "petAge": 14, "petCategory": "Cat", "petLocation": "Dhaka" },
                { "_id": "b", "petName": "Kiwi", "petAge": 2.5, "petCategory": "cat" }
            ],
            "nextPage": 1
        }))
        .unwrap();

        assert_eq!(page.pets.len(), 2);
        assert_eq!(page.pets[1].pet_category, PetCategory::Cat);
        assert_eq!(page.pets[1].pet_age, 3);
        assert_eq!(page.next_page, Some(1));
    }

    #[test]
    fn test_update_payload_omits_missing_image() {
        let update = PetUpdate {
            pet_name: "Milo".to_string(),
            pet_age: 3,
            pet_category: PetCategory::Cat,
            pet_location: "Dhaka".to_string(),
            short_description: "Calm".to_string(),
            long_description: "<p>Calm cat</p>".to_string(),
            pet_image: None,
        };

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["petName"], "Milo");
        assert_eq!(value["petCategory"], "Cat");
        assert!(value.get("petImage").is_none());
    }
}
