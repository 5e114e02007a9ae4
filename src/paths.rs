//! Path resolution for client-side files.
//!
//! # Base Directory
//! - [`get_pawshaven_dir`] - per-user data directory (`<data dir>/pawshaven/`)
//!
//! # Catalog Files
//! - [`get_favorites_path`] - favorites set used by `browse` and `favorite`

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the per-user pawshaven directory.
///
/// Resolution order:
/// 1. `PAWSHAVEN_HOME` environment variable (if set)
/// 2. the platform data directory, e.g. `~/.local/share/pawshaven/`
pub fn get_pawshaven_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var("PAWSHAVEN_HOME")
        && !home.is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    let data = dirs::data_dir().context("Failed to get user data directory")?;
    Ok(data.join("pawshaven"))
}

/// Get the favorites file path: `<pawshaven dir>/favorites.json`
pub fn get_favorites_path() -> Result<PathBuf> {
    Ok(get_pawshaven_dir()?.join("favorites.json"))
}
