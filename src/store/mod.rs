//! Pet record store with pluggable backends.
//!
//! Every backend implements [`PetBackend`]; [`PetStore`] is the cloneable
//! handle the HTTP layer holds. Backends:
//!
//! - **JsonFileBackend**: one JSON document rewritten on every write (default)
//! - **SqliteBackend**: a `pets` table in a SQLite database
//! - **MemoryBackend**: non-persistent, for tests and embedding
//! - **RemoteTableBackend**: a hosted PostgREST table, always wrapped in a
//!   [`FallbackBackend`] that serves reads from a local backend when the
//!   remote list fails or comes back empty
//!
//! # Example
//!
//! ```ignore
//! use pawshaven::store::PetStore;
//!
//! let store = PetStore::file("data/db.json");
//! let pet = store.insert(new_pet).await?;
//! assert_eq!(store.get(pet.id).await?, Some(pet));
//! ```

mod backend;
pub(crate) mod document;
mod error;
mod fallback;
mod file;
mod handle;
mod memory;
mod remote;
mod sqlite;

#[cfg(test)]
mod tests;

pub use backend::PetBackend;
pub use error::{Result, StoreError};
pub use fallback::FallbackBackend;
pub use file::JsonFileBackend;
pub use handle::PetStore;
pub use memory::MemoryBackend;
pub use remote::{RemoteTable, RemoteTableBackend};
pub use sqlite::SqliteBackend;
