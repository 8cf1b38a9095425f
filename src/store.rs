//! JSON backing file.
//!
//! Layout: `{"entries": [ {...}, ... ]}` with every entry in its transport
//! form. Writes replace the whole file; there is no atomic rename and no lock.

use crate::entry::{Entry, Transport};
use crate::error::{DirectoryError, Result};
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredDirectory {
    #[serde(default)]
    entries: Vec<Transport>,
}

/// Read all entries from `path`.
///
/// Returns `Ok(None)` when the file does not exist.
///
/// # Errors
///
/// [`DirectoryError::Persistence`] if the file cannot be read, is not valid
/// JSON of the expected shape, holds an entry that fails coercion, or holds
/// two entries with the same id.
pub fn read_entries(path: &Path) -> Result<Option<Vec<Entry>>> {
    if !path.exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(path).map_err(|e| DirectoryError::persistence(path, e))?;
    let stored: StoredDirectory =
        serde_json::from_str(&raw).map_err(|e| DirectoryError::persistence(path, e))?;

    let entries = stored
        .entries
        .iter()
        .enumerate()
        .map(|(position, map)| {
            Entry::from_transport(map).map_err(|e| {
                DirectoryError::persistence(path, format!("entry #{}: {e}", position + 1))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::with_capacity(entries.len());
    if let Some(duplicate) = entries.iter().find(|e| !seen.insert(e.id)) {
        return Err(DirectoryError::persistence(
            path,
            format!("duplicate id {}", duplicate.id),
        ));
    }

    trace!("Read {} entries from {}", entries.len(), path.display());
    Ok(Some(entries))
}

/// Overwrite `path` with `entries`, pretty-printed.
///
/// # Errors
///
/// [`DirectoryError::Persistence`] if serialization or the write fails.
pub fn write_entries(path: &Path, entries: &[Entry]) -> Result<()> {
    let stored = StoredDirectory {
        entries: entries.iter().map(Entry::to_transport).collect(),
    };
    let json = serde_json::to_string_pretty(&stored).map_err(|e| DirectoryError::persistence(path, e))?;
    fs::write(path, json).map_err(|e| DirectoryError::persistence(path, e))?;

    trace!("Wrote {} entries to {}", entries.len(), path.display());
    Ok(())
}
