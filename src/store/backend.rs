//! Backend trait for the pet store.
//!
//! Defines the interface that all pet storage backends must implement,
//! enabling pluggable storage (JSON file, SQLite, memory, remote table).

use async_trait::async_trait;

use super::error::Result;
use crate::model::{NewPet, Pet, PetId};

/// Backend trait for pet record storage.
///
/// All backends must be thread-safe (`Send + Sync`) for use with tokio.
/// Ids are assigned by the backend and are never reused, even after a
/// delete.
///
/// # Example
///
/// ```ignore
/// use pawshaven::store::{MemoryBackend, PetBackend};
///
/// let backend = MemoryBackend::new();
/// let pet = backend.insert(new_pet).await?;
/// let all = backend.list().await?;
/// ```
#[async_trait]
pub trait PetBackend: Send + Sync + 'static {
    /// Short backend name for logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Lists every pet, ascending by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    async fn list(&self) -> Result<Vec<Pet>>;

    /// Retrieves a pet by id.
    ///
    /// Returns `Ok(None)` if no pet has this id.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    async fn get(&self, id: PetId) -> Result<Option<Pet>>;

    /// Stores a validated pet, assigning its id and creation time.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be persisted.
    async fn insert(&self, pet: NewPet) -> Result<Pet>;

    /// Deletes a pet by id.
    ///
    /// Returns `Ok(true)` if a pet was removed, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage operation fails.
    async fn delete(&self, id: PetId) -> Result<bool>;
}
