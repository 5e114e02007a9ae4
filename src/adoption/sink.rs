//! Adoption sink trait.

use async_trait::async_trait;

use crate::model::{Adoption, NewAdoption};
use crate::store::Result;

/// Destination for accepted adoption applications.
#[async_trait]
pub trait AdoptionSink: Send + Sync + 'static {
    /// Short name used in logs and the health report.
    fn name(&self) -> &'static str;

    /// Records an application and returns the stored row.
    async fn submit(&self, application: NewAdoption) -> Result<Adoption>;
}
