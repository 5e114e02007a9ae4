//! Error type shared by every storage backend.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures raised by pet and adoption stores.
///
/// All variants surface to HTTP clients as a 500.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed store document {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("remote table request failed: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("remote table returned {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    #[error("remote table returned no row for {0}")]
    RemoteEmpty(&'static str),

    #[error("invalid remote table url: {0}")]
    RemoteUrl(#[from] url::ParseError),

    #[error("storage task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
