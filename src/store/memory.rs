//! In-memory pet backend.
//!
//! Provides a fast, non-persistent store using DashMap for concurrent
//! access. Ideal for testing, development, and embedded use cases.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use super::backend::PetBackend;
use super::error::Result;
use crate::model::{NewPet, Pet, PetId};

/// In-memory pet storage backend using DashMap.
///
/// All data is lost when the process exits. Ids come from an atomic
/// counter, so concurrent inserts never collide.
#[derive(Clone)]
pub struct MemoryBackend {
    pets: Arc<DashMap<PetId, Pet>>,
    next_id: Arc<AtomicI64>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self {
            pets: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl MemoryBackend {
    /// Creates a new empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored pets.
    pub fn len(&self) -> usize {
        self.pets.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }
}

#[async_trait]
impl PetBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<Pet>> {
        let mut pets: Vec<Pet> = self.pets.iter().map(|entry| entry.value().clone()).collect();
        pets.sort_by_key(|p| p.id);
        Ok(pets)
    }

    async fn get(&self, id: PetId) -> Result<Option<Pet>> {
        Ok(self.pets.get(&id).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, pet: NewPet) -> Result<Pet> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Pet::from_new(id, pet, Utc::now());
        self.pets.insert(id, created.clone());
        Ok(created)
    }

    async fn delete(&self, id: PetId) -> Result<bool> {
        Ok(self.pets.remove(&id).is_some())
    }
}
