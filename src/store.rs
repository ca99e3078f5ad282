//! JSON persistence of project records.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::record::ProjectRecord;

/// Loads records from a JSON array file.
///
/// Never fails: a missing, unreadable or unparsable file yields an empty
/// vector. Read and parse failures are logged.
///
/// # Arguments
///
/// * `path`: Output file written by [`save`]
pub fn load(path: impl AsRef<Path>) -> Vec<ProjectRecord> {
    let path = path.as_ref();
    if !path.exists() {
        return Vec::new();
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read stored records");
            return Vec::new();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "stored records are not a valid JSON array");
        Vec::new()
    })
}

/// Writes records as an indented JSON array, replacing any existing file.
///
/// Creates parent directories as needed. Non-ASCII text is written as is.
///
/// # Errors
///
/// Returns error if directory creation, serialization or the write fails
pub fn save(path: impl AsRef<Path>, records: &[ProjectRecord]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(records).context("Failed to serialize records")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), count = records.len(), "saved project records");
    Ok(())
}
