//! CLI command implementations.
//!
//! - [`serve`] - run the REST API
//! - [`browse`] - list pets from a running server through the catalog filters
//! - [`favorite`] - toggle a pet in the local favorites set

pub mod browse;
pub mod favorite;
pub mod serve;

use pawshaven::model::Pet;

/// One catalog line: favorite marker, id, name, type, age, gender.
pub fn format_pet_line(pet: &Pet, favorite: bool) -> String {
    let marker = if favorite { '*' } else { ' ' };
    let years = if pet.years.is_empty() { "-" } else { pet.years.as_str() };
    let gender = if pet.gender.is_empty() { "-" } else { pet.gender.as_str() };
    format!(
        "{marker} {:>4}  {:<24} {:<8} {:<10} {gender}",
        pet.id, pet.name, pet.kind, years
    )
}
