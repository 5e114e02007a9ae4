//! File-backed adoption sink.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;

use super::sink::AdoptionSink;
use crate::model::{Adoption, NewAdoption};
use crate::store::Result;
use crate::store::document::{read_document, write_document};

#[derive(Debug, Default, Serialize, Deserialize)]
struct AdoptionDocument {
    #[serde(default)]
    next_id: i64,
    #[serde(default)]
    applications: Vec<Adoption>,
}

/// Appends applications to a JSON document.
///
/// Shares the pet file store's write discipline: one writer at a time,
/// whole-document atomic replace.
#[derive(Clone)]
pub struct LocalAdoptionSink {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl LocalAdoptionSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Arc::new(path.as_ref().to_path_buf()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Every stored application, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read.
    pub async fn applications(&self) -> Result<Vec<Adoption>> {
        let path = Arc::clone(&self.path);
        let document: AdoptionDocument =
            tokio::task::spawn_blocking(move || read_document(&path)).await??;
        Ok(document.applications)
    }
}

#[async_trait]
impl AdoptionSink for LocalAdoptionSink {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn submit(&self, application: NewAdoption) -> Result<Adoption> {
        // Held by the blocking task so a dropped request cannot release it early.
        let guard = Arc::clone(&self.write_lock).lock_owned().await;
        let path = Arc::clone(&self.path);
        let adoption = tokio::task::spawn_blocking(move || -> Result<Adoption> {
            let _guard = guard;
            let mut document: AdoptionDocument = read_document(&path)?;
            let floor = document.applications.iter().map(|a| a.id).max().unwrap_or(0);
            document.next_id = document.next_id.max(floor) + 1;
            let adoption = Adoption {
                id: document.next_id,
                application,
                submitted_at: Utc::now(),
            };
            document.applications.push(adoption.clone());
            write_document(&path, &document)?;
            Ok(adoption)
        })
        .await??;
        info!(id = adoption.id, path = %self.path.display(), "adoption application stored locally");
        Ok(adoption)
    }
}
