//! `pawshaven favorite <ID>` - toggle a favorite.

use std::path::Path;

use anyhow::{Context, Result};

use pawshaven::catalog::{ApiClient, Favorites};
use pawshaven::model::PetId;

/// Toggles `id` in the favorites set after checking the pet exists.
pub async fn execute(server: &str, id: PetId, favorites_path: &Path) -> Result<()> {
    let client = ApiClient::new(server)?;
    let mut favorites = Favorites::load(favorites_path)
        .with_context(|| format!("Failed to load favorites from {}", favorites_path.display()))?;

    if favorites.has_legacy_names() {
        let pets = client.list_pets().await?;
        favorites.resolve_legacy(&pets);
    }

    // Removing a favorite for a pet that has since been deleted is allowed.
    let pet = client.get_pet(id).await?;
    if pet.is_none() && !favorites.contains(id) {
        anyhow::bail!("Pet {id} not found on {server}");
    }

    let now_favorite = favorites.toggle(id);
    favorites
        .save(favorites_path)
        .with_context(|| format!("Failed to save favorites to {}", favorites_path.display()))?;

    let name = pet.map_or_else(|| format!("#{id}"), |p| p.name);
    if now_favorite {
        println!("Added {name} to favorites ({} total)", favorites.len());
    } else {
        println!("Removed {name} from favorites ({} total)", favorites.len());
    }
    Ok(())
}
