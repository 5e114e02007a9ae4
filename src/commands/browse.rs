//! `pawshaven browse` - filtered pet listing.

use std::path::Path;

use anyhow::{Context, Result};

use pawshaven::catalog::{ApiClient, CatalogFilter, Favorites};

use super::format_pet_line;

/// Fetches the pet list, applies the filter, and prints matching pets.
pub async fn execute(
    server: &str,
    filter: &CatalogFilter,
    favorites_only: bool,
    favorites_path: &Path,
) -> Result<()> {
    let client = ApiClient::new(server)?;
    let pets = client.list_pets().await?;

    let mut favorites = Favorites::load(favorites_path)
        .with_context(|| format!("Failed to load favorites from {}", favorites_path.display()))?;
    if favorites.has_legacy_names() && !pets.is_empty() {
        favorites.resolve_legacy(&pets);
        favorites
            .save(favorites_path)
            .context("Failed to save migrated favorites")?;
    }

    let matching: Vec<_> = filter
        .apply(&pets)
        .into_iter()
        .filter(|pet| !favorites_only || favorites.contains(pet.id))
        .collect();

    if matching.is_empty() {
        println!("No pets match the current filters.");
        return Ok(());
    }

    for pet in &matching {
        println!("{}", format_pet_line(pet, favorites.contains(pet.id)));
    }
    println!();
    println!(
        "{} of {} pets shown, {} favorite(s)",
        matching.len(),
        pets.len(),
        favorites.resolve(&pets).len()
    );
    Ok(())
}
