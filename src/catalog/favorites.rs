//! Favorites set persisted as `{"favorites": [3, 7, 12]}`.
//!
//! Older clients stored pet names instead of ids. Such entries are kept
//! aside on load until [`Favorites::resolve_legacy`] maps them onto the
//! current pet list.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::{Pet, PetId};
use crate::store::Result;
use crate::store::document::{read_document, write_document};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum FavoriteEntry {
    Id(PetId),
    Name(String),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FavoritesDocument {
    #[serde(default)]
    favorites: Vec<FavoriteEntry>,
}

/// Set of favorite pet ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    ids: BTreeSet<PetId>,
    legacy_names: Vec<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: PetId) -> bool {
        self.ids.contains(&id)
    }

    /// Adds an id; returns false if it was already a favorite.
    pub fn add(&mut self, id: PetId) -> bool {
        self.ids.insert(id)
    }

    /// Removes an id; returns false if it was not a favorite.
    pub fn remove(&mut self, id: PetId) -> bool {
        self.ids.remove(&id)
    }

    /// Flips membership and returns whether the id is now a favorite.
    pub fn toggle(&mut self, id: PetId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = PetId> + '_ {
        self.ids.iter().copied()
    }

    /// Favorite pets present in `pets`, in list order.
    pub fn resolve<'a>(&self, pets: &'a [Pet]) -> Vec<&'a Pet> {
        pets.iter().filter(|pet| self.contains(pet.id)).collect()
    }

    /// True when name entries from an older favorites file are pending.
    pub fn has_legacy_names(&self) -> bool {
        !self.legacy_names.is_empty()
    }

    /// Replaces pending name entries with the ids of pets carrying those
    /// names. Names matching no pet are dropped. Returns the number of ids
    /// added.
    ///
    /// An empty pet list resolves nothing and keeps the names pending.
    pub fn resolve_legacy(&mut self, pets: &[Pet]) -> usize {
        if pets.is_empty() {
            debug!(names = self.legacy_names.len(), "no pets to migrate favorites against");
            return 0;
        }
        let names = std::mem::take(&mut self.legacy_names);
        let before = self.ids.len();
        for pet in pets {
            if names.iter().any(|name| *name == pet.name) {
                self.ids.insert(pet.id);
            }
        }
        let added = self.ids.len() - before;
        info!(names = names.len(), added, "migrated name-keyed favorites");
        added
    }

    /// Loads favorites from `path`; a missing file is an empty set.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let document: FavoritesDocument = read_document(path)?;
        let mut favorites = Self::new();
        for entry in document.favorites {
            match entry {
                FavoriteEntry::Id(id) => {
                    favorites.ids.insert(id);
                },
                FavoriteEntry::Name(name) => match name.trim().parse::<PetId>() {
                    Ok(id) => {
                        favorites.ids.insert(id);
                    },
                    Err(_) if !favorites.legacy_names.contains(&name) => {
                        favorites.legacy_names.push(name);
                    },
                    Err(_) => {},
                },
            }
        }
        debug!(path = %path.display(), count = favorites.len(), "favorites loaded");
        Ok(favorites)
    }

    /// Writes the id set to `path`, followed by any names still pending
    /// migration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let document = FavoritesDocument {
            favorites: self
                .ids()
                .map(FavoriteEntry::Id)
                .chain(self.legacy_names.iter().cloned().map(FavoriteEntry::Name))
                .collect(),
        };
        write_document(path, &document)
    }
}
