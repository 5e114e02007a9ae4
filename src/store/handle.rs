//! High-level `PetStore` wrapper over backend implementations.
//!
//! Provides a convenient API that wraps any `PetBackend` implementation.

use std::path::Path;
use std::sync::Arc;

use super::backend::PetBackend;
use super::error::Result;
use super::fallback::FallbackBackend;
use super::file::JsonFileBackend;
use super::memory::MemoryBackend;
use super::remote::RemoteTableBackend;
use super::sqlite::SqliteBackend;
use crate::config::RemoteConfig;
use crate::model::{NewPet, Pet, PetId};

/// High-level pet store interface.
///
/// Wraps a `PetBackend` implementation and provides a consistent API
/// regardless of the underlying storage mechanism.
///
/// # Thread Safety
///
/// `PetStore` is `Clone` and can be shared across request handlers. The
/// underlying backend handles concurrent access safely.
///
/// # Example
///
/// ```ignore
/// use pawshaven::store::PetStore;
///
/// let store = PetStore::memory();
/// let pet = store.insert(new_pet).await?;
/// for pet in store.list().await? {
///     println!("{} {}", pet.id, pet.name);
/// }
/// ```
#[derive(Clone)]
pub struct PetStore {
    backend: Arc<dyn PetBackend>,
}

impl PetStore {
    /// Creates a store backed by a JSON document at `path`.
    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        Self::custom(JsonFileBackend::new(path))
    }

    /// Creates a store backed by a SQLite database at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn sqlite<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::custom(SqliteBackend::open(path)?))
    }

    /// Creates a non-persistent in-memory store.
    pub fn memory() -> Self {
        Self::custom(MemoryBackend::new())
    }

    /// Creates a store over the remote table, reading from `fallback`
    /// when the remote list fails or is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote client cannot be built.
    pub fn remote(config: &RemoteConfig, fallback: PetStore) -> Result<Self> {
        let primary: Arc<dyn PetBackend> = Arc::new(RemoteTableBackend::from_config(config)?);
        Ok(Self::from_arc(Arc::new(FallbackBackend::new(
            primary,
            fallback.backend,
        ))))
    }

    /// Creates a store with a custom backend.
    pub fn custom<B: PetBackend>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Creates a store from a shared backend.
    pub fn from_arc(backend: Arc<dyn PetBackend>) -> Self {
        Self { backend }
    }

    /// Name of the active backend.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Lists every pet, ascending by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub async fn list(&self) -> Result<Vec<Pet>> {
        self.backend.list().await
    }

    /// Retrieves a pet by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub async fn get(&self, id: PetId) -> Result<Option<Pet>> {
        self.backend.get(id).await
    }

    /// Stores a validated pet and returns the full record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be persisted.
    pub async fn insert(&self, pet: NewPet) -> Result<Pet> {
        self.backend.insert(pet).await
    }

    /// Deletes a pet, returning whether a record was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend operation fails.
    pub async fn delete(&self, id: PetId) -> Result<bool> {
        self.backend.delete(id).await
    }
}
