//! Record types shared by the stores, the HTTP layer and the catalog.
//!
//! - [`Pet`] - a persisted pet record
//! - [`NewPet`] - a validated pet waiting for an id
//! - [`PetInput`] - the raw create-pet request body
//! - [`Adoption`], [`NewAdoption`], [`AdoptionInput`] - the same trio for
//!   adoption applications

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Store-assigned pet identifier.
pub type PetId = i64;

/// A persisted pet record.
///
/// `type` is a Rust keyword, so the field is `kind` in code and `type` on the
/// wire. Free-text fields tolerate `null` from older documents and remote
/// rows and read back as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub years: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub img: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Pet {
    /// Builds the full record from a validated pet and its assigned id.
    pub fn from_new(id: PetId, pet: NewPet, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: pet.name,
            kind: pet.kind,
            years: pet.years,
            gender: pet.gender,
            img: pet.img,
            description: pet.description,
            created_at: Some(created_at),
        }
    }
}

/// A sanitized, validated pet that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPet {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub years: String,
    pub gender: String,
    pub img: String,
    pub description: String,
}

/// Raw create-pet body. Scalars of any JSON type are accepted as text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PetInput {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub years: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub img: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
}

/// A sanitized adoption application, stored with snake_case columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAdoption {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub zip: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub housing_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub own_rent: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub landlord_permission: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub has_yard: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub other_pets: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pet_experience: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reason: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub references: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pet_name: String,
}

/// A stored adoption application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adoption {
    pub id: i64,
    #[serde(flatten)]
    pub application: NewAdoption,
    pub submitted_at: DateTime<Utc>,
}

/// Raw adoption form body. Field names follow the client form (camelCase);
/// snake_case spellings are accepted as aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdoptionInput {
    #[serde(default, alias = "full_name", deserialize_with = "lenient_text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub zip: Option<String>,
    #[serde(default, alias = "housing_type", deserialize_with = "lenient_text")]
    pub housing_type: Option<String>,
    #[serde(default, alias = "own_rent", deserialize_with = "lenient_text")]
    pub own_rent: Option<String>,
    #[serde(
        default,
        alias = "landlord_permission",
        deserialize_with = "lenient_text"
    )]
    pub landlord_permission: Option<String>,
    #[serde(default, alias = "has_yard", deserialize_with = "lenient_text")]
    pub has_yard: Option<String>,
    #[serde(default, alias = "other_pets", deserialize_with = "lenient_text")]
    pub other_pets: Option<String>,
    #[serde(default, alias = "pet_experience", deserialize_with = "lenient_text")]
    pub pet_experience: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub references: Option<String>,
    #[serde(default, alias = "pet_name", deserialize_with = "lenient_text")]
    pub pet_name: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads any JSON scalar as text: numbers and booleans are stringified,
/// except zero and `false`, which read as absent like `null`. Arrays and
/// objects carry no usable text and read as `None`.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        serde_json::Value::Bool(true) => Some(true.to_string()),
        serde_json::Value::Number(_)
        | serde_json::Value::Bool(false)
        | serde_json::Value::Null
        | serde_json::Value::Array(_)
        | serde_json::Value::Object(_) => None,
    })
}
