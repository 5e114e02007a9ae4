//! `pawshaven serve`

use anyhow::Result;
use tracing::warn;

use pawshaven::config::Config;

/// Validates the configuration and runs the server until shutdown.
pub async fn execute(config: Config) -> Result<()> {
    let validation = config.validate()?;
    for warning in &validation.warnings {
        warn!("{warning}");
    }
    pawshaven::http::serve(&config).await
}
