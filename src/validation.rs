//! Input sanitization and validation for every write path.
//!
//! All free text is run through [`sanitize`] before it is checked or
//! persisted. The tag strip is a plain pattern match, not an HTML parser:
//! it removes anything shaped like `<...>` and nothing else.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::constants::{MAX_NAME_LEN, RECOMMENDED_TYPES};
use crate::model::{AdoptionInput, NewAdoption, NewPet, PetInput};

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is a valid regex"));

/// Rejections produced while validating request bodies.
///
/// The display strings are returned to clients verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name and type required")]
    MissingNameOrType,

    #[error("name too long")]
    NameTooLong,

    #[error("Missing required fields")]
    MissingAdoptionFields,
}

/// Strips `<...>` markup and trims surrounding whitespace.
///
/// A `<` left in the output has no `>` after it, so a second pass finds
/// nothing to strip: `sanitize(&sanitize(x)) == sanitize(x)`.
pub fn sanitize(text: &str) -> String {
    TAG_PATTERN.replace_all(text, "").trim().to_string()
}

fn clean(field: Option<&str>) -> String {
    field.map(sanitize).unwrap_or_default()
}

/// Lower-cases recommended types; anything else is kept verbatim.
pub fn normalize_type(kind: &str) -> String {
    let lowered = kind.to_lowercase();
    if RECOMMENDED_TYPES.contains(&lowered.as_str()) {
        lowered
    } else {
        kind.to_string()
    }
}

/// Sanitizes and validates a create-pet body.
///
/// # Errors
///
/// - [`ValidationError::MissingNameOrType`] if name or type is empty after sanitizing
/// - [`ValidationError::NameTooLong`] if the name exceeds [`MAX_NAME_LEN`]
///   UTF-16 code units
pub fn validate_pet(input: &PetInput) -> Result<NewPet, ValidationError> {
    let name = clean(input.name.as_deref());
    let kind = clean(input.kind.as_deref());

    if name.is_empty() || kind.is_empty() {
        return Err(ValidationError::MissingNameOrType);
    }
    if name.encode_utf16().count() > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong);
    }

    Ok(NewPet {
        name,
        kind: normalize_type(&kind),
        years: clean(input.years.as_deref()),
        gender: clean(input.gender.as_deref()),
        img: clean(input.img.as_deref()),
        description: clean(input.description.as_deref()),
    })
}

/// Sanitizes and validates an adoption application.
///
/// # Errors
///
/// Returns [`ValidationError::MissingAdoptionFields`] if full name, email or
/// phone is empty after sanitizing.
pub fn validate_adoption(input: &AdoptionInput) -> Result<NewAdoption, ValidationError> {
    let application = NewAdoption {
        full_name: clean(input.full_name.as_deref()),
        email: clean(input.email.as_deref()),
        phone: clean(input.phone.as_deref()),
        address: clean(input.address.as_deref()),
        city: clean(input.city.as_deref()),
        state: clean(input.state.as_deref()),
        zip: clean(input.zip.as_deref()),
        housing_type: clean(input.housing_type.as_deref()),
        own_rent: clean(input.own_rent.as_deref()),
        landlord_permission: clean(input.landlord_permission.as_deref()),
        has_yard: clean(input.has_yard.as_deref()),
        other_pets: clean(input.other_pets.as_deref()),
        pet_experience: clean(input.pet_experience.as_deref()),
        reason: clean(input.reason.as_deref()),
        references: clean(input.references.as_deref()),
        pet_name: clean(input.pet_name.as_deref()),
    };

    if application.full_name.is_empty()
        || application.email.is_empty()
        || application.phone.is_empty()
    {
        return Err(ValidationError::MissingAdoptionFields);
    }

    Ok(application)
}
