//! Try-primary-then-secondary read combinator.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::backend::PetBackend;
use super::error::Result;
use crate::model::{NewPet, Pet, PetId};

/// Serves reads from `primary`, falling back to `secondary`.
///
/// - `list` falls back when the primary errors or returns no rows.
/// - `get` falls back when the primary has no such row; primary errors
///   are returned as-is.
/// - `insert` and `delete` go to the primary only and are never mirrored
///   to the secondary.
#[derive(Clone)]
pub struct FallbackBackend {
    primary: Arc<dyn PetBackend>,
    secondary: Arc<dyn PetBackend>,
}

impl FallbackBackend {
    /// Combines two backends.
    pub fn new(primary: Arc<dyn PetBackend>, secondary: Arc<dyn PetBackend>) -> Self {
        Self { primary, secondary }
    }
}

#[async_trait]
impl PetBackend for FallbackBackend {
    fn name(&self) -> &'static str {
        self.primary.name()
    }

    async fn list(&self) -> Result<Vec<Pet>> {
        match self.primary.list().await {
            Ok(pets) if !pets.is_empty() => return Ok(pets),
            Ok(_) => warn!(
                primary = self.primary.name(),
                secondary = self.secondary.name(),
                "primary store returned no pets, serving fallback store"
            ),
            Err(error) => warn!(
                primary = self.primary.name(),
                secondary = self.secondary.name(),
                %error,
                "primary store list failed, serving fallback store"
            ),
        }
        self.secondary.list().await
    }

    async fn get(&self, id: PetId) -> Result<Option<Pet>> {
        if let Some(pet) = self.primary.get(id).await? {
            return Ok(Some(pet));
        }
        self.secondary.get(id).await
    }

    async fn insert(&self, pet: NewPet) -> Result<Pet> {
        self.primary.insert(pet).await
    }

    async fn delete(&self, id: PetId) -> Result<bool> {
        self.primary.delete(id).await
    }
}
