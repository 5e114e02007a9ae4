//! Remote-table adoption sink.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::sink::AdoptionSink;
use crate::config::RemoteConfig;
use crate::constants::REMOTE_ADOPTIONS_TABLE;
use crate::model::{Adoption, NewAdoption};
use crate::store::{RemoteTable, Result};

#[derive(Serialize)]
struct ApplicationRow<'a> {
    #[serde(flatten)]
    application: &'a NewAdoption,
    submitted_at: DateTime<Utc>,
}

/// Inserts applications into the hosted `adoption_applications` table.
#[derive(Clone, Debug)]
pub struct RemoteAdoptionSink {
    table: RemoteTable,
}

impl RemoteAdoptionSink {
    pub fn new(table: RemoteTable) -> Self {
        Self { table }
    }

    /// # Errors
    ///
    /// Returns an error if the remote client cannot be built.
    pub fn from_config(config: &RemoteConfig) -> Result<Self> {
        Ok(Self::new(RemoteTable::new(config, REMOTE_ADOPTIONS_TABLE)?))
    }
}

#[async_trait]
impl AdoptionSink for RemoteAdoptionSink {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn submit(&self, application: NewAdoption) -> Result<Adoption> {
        let row = ApplicationRow {
            application: &application,
            submitted_at: Utc::now(),
        };
        let adoption: Adoption = self.table.insert(&row).await?;
        info!(id = adoption.id, table = self.table.table(), "adoption application stored remotely");
        Ok(adoption)
    }
}
