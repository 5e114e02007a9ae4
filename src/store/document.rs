//! Whole-document JSON persistence.
//!
//! The file stores keep their entire dataset in one JSON document. Reads
//! load the whole file; writes go to a temp file in the same directory and
//! are renamed over the original, so a reader never sees a half-written
//! document.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{Result, StoreError};

/// Loads a document, returning `D::default()` for a missing or empty file.
pub(crate) fn read_document<D>(path: &Path) -> Result<D>
where
    D: DeserializeOwned + Default,
{
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(D::default()),
        Err(e) => return Err(StoreError::io(path, e)),
    };

    if content.trim().is_empty() {
        return Ok(D::default());
    }

    serde_json::from_str(&content).map_err(|source| StoreError::Document {
        path: path.to_path_buf(),
        source,
    })
}

/// Replaces the document at `path`, creating parent directories as needed.
pub(crate) fn write_document<D>(path: &Path, document: &D) -> Result<()>
where
    D: Serialize,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

    let json = serde_json::to_vec_pretty(document).map_err(|source| StoreError::Document {
        path: path.to_path_buf(),
        source,
    })?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
    tmp.write_all(&json)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| StoreError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| StoreError::io(path, e.error))?;

    Ok(())
}
