//! JSON-file pet backend.
//!
//! Persists the whole dataset as one document:
//!
//! ```json
//! { "next_id": 4, "pets": [ { "id": 1, "name": "Buddy", "type": "dog" } ] }
//! ```
//!
//! Writes are serialized through an async mutex and ids come from the
//! persisted `next_id` counter, so concurrent creates never share an id and
//! a deleted id is never handed out again.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use super::backend::PetBackend;
use super::document::{read_document, write_document};
use super::error::Result;
use crate::model::{NewPet, Pet, PetId};

/// On-disk layout of the pet document.
///
/// `next_id` is absent in documents written before the counter existed;
/// [`PetDocument::allocate_id`] repairs it from the data.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PetDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    next_id: Option<PetId>,
    #[serde(default)]
    pets: Vec<Pet>,
}

impl PetDocument {
    /// Hands out the next id and advances the counter.
    ///
    /// Never returns an id at or below one already present, even if the
    /// counter was edited by hand or lost.
    fn allocate_id(&mut self) -> PetId {
        let floor = self.pets.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let id = self.next_id.map_or(floor, |next| next.max(floor));
        self.next_id = Some(id + 1);
        id
    }
}

/// JSON-file pet storage backend.
///
/// # Thread Safety
///
/// `JsonFileBackend` is `Clone`; clones share the same write lock, so all
/// writers in the process are serialized. Other processes writing the same
/// file are not coordinated.
#[derive(Clone)]
pub struct JsonFileBackend {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileBackend {
    /// Creates a backend for the document at `path`.
    ///
    /// The file is not touched until the first read or write; a missing
    /// file reads as an empty store.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Arc::new(path.as_ref().to_path_buf()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_sync(path: &Path) -> Result<PetDocument> {
        let mut document: PetDocument = read_document(path)?;
        document.pets.sort_by_key(|p| p.id);
        Ok(document)
    }

    async fn load(&self) -> Result<PetDocument> {
        let path = Arc::clone(&self.path);
        tokio::task::spawn_blocking(move || Self::load_sync(&path)).await?
    }

    /// Runs a read-modify-write cycle under the write lock.
    ///
    /// The guard moves into the blocking task, so the lock stays held until
    /// the write finishes even if the calling future is dropped.
    async fn modify<T, F>(&self, apply: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PetDocument) -> (T, bool) + Send + 'static,
    {
        let guard = Arc::clone(&self.write_lock).lock_owned().await;
        let path = Arc::clone(&self.path);
        tokio::task::spawn_blocking(move || -> Result<T> {
            let _guard = guard;
            let mut document = Self::load_sync(&path)?;
            let (result, changed) = apply(&mut document);
            if changed {
                write_document(&path, &document)?;
            }
            Ok(result)
        })
        .await?
    }
}

#[async_trait]
impl PetBackend for JsonFileBackend {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn list(&self) -> Result<Vec<Pet>> {
        Ok(self.load().await?.pets)
    }

    async fn get(&self, id: PetId) -> Result<Option<Pet>> {
        Ok(self.load().await?.pets.into_iter().find(|p| p.id == id))
    }

    async fn insert(&self, pet: NewPet) -> Result<Pet> {
        let created = self
            .modify(move |document| {
                let id = document.allocate_id();
                let created = Pet::from_new(id, pet, Utc::now());
                document.pets.push(created.clone());
                (created, true)
            })
            .await?;
        debug!(id = created.id, path = %self.path.display(), "pet written to file store");
        Ok(created)
    }

    async fn delete(&self, id: PetId) -> Result<bool> {
        self.modify(move |document| {
            let before = document.pets.len();
            document.pets.retain(|p| p.id != id);
            let removed = document.pets.len() != before;
            (removed, removed)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet(id: PetId) -> Pet {
        Pet {
            id,
            name: format!("pet-{id}"),
            kind: "dog".to_string(),
            years: String::new(),
            gender: String::new(),
            img: String::new(),
            description: String::new(),
            created_at: None,
        }
    }

    #[test]
    fn test_allocate_id_on_empty_document() {
        let mut document = PetDocument::default();
        assert_eq!(document.allocate_id(), 1);
        assert_eq!(document.allocate_id(), 2);
        assert_eq!(document.next_id, Some(3));
    }

    #[test]
    fn test_allocate_id_repairs_missing_counter() {
        let mut document = PetDocument {
            next_id: None,
            pets: vec![pet(3), pet(9)],
        };
        assert_eq!(document.allocate_id(), 10);
    }

    #[test]
    fn test_allocate_id_never_goes_below_existing_ids() {
        let mut document = PetDocument {
            next_id: Some(2),
            pets: vec![pet(5)],
        };
        assert_eq!(document.allocate_id(), 6);
    }

    #[test]
    fn test_allocate_id_keeps_counter_ahead_of_data() {
        let mut document = PetDocument {
            next_id: Some(12),
            pets: vec![pet(5)],
        };
        assert_eq!(document.allocate_id(), 12);
    }
}
