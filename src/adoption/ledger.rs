//! `AdoptionLedger` handle over a sink implementation.

use std::path::Path;
use std::sync::Arc;

use super::local::LocalAdoptionSink;
use super::remote::RemoteAdoptionSink;
use super::sink::AdoptionSink;
use crate::config::RemoteConfig;
use crate::model::{Adoption, NewAdoption};
use crate::store::Result;

/// Cloneable handle the HTTP layer uses to record applications.
#[derive(Clone)]
pub struct AdoptionLedger {
    sink: Arc<dyn AdoptionSink>,
}

impl AdoptionLedger {
    /// Records applications in a local JSON document.
    pub fn local<P: AsRef<Path>>(path: P) -> Self {
        Self::custom(LocalAdoptionSink::new(path))
    }

    /// Records applications in the remote table.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote client cannot be built.
    pub fn remote(config: &RemoteConfig) -> Result<Self> {
        Ok(Self::custom(RemoteAdoptionSink::from_config(config)?))
    }

    pub fn custom<S: AdoptionSink>(sink: S) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Name of the active sink.
    pub fn sink_name(&self) -> &'static str {
        self.sink.name()
    }

    /// Stores an application.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink rejects or cannot persist the row.
    pub async fn submit(&self, application: NewAdoption) -> Result<Adoption> {
        self.sink.submit(application).await
    }
}
