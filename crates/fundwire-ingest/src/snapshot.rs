//! The persisted snapshot: the entire accumulated record set, replaced
//! wholesale each run.
//!
//! Loading is tolerant (missing or unreadable file is an empty set — the
//! first run has nothing to read). Saving writes to a temp file and renames
//! over the target so an interrupted run leaves either the old snapshot or
//! the new one, never a mix.

use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use fundwire_core::Record;

use crate::error::IngestError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub last_updated: String,
    pub data: Vec<Record>,
}

/// Loads the accumulated record set from `path`.
///
/// A missing file is a normal first run. A corrupt file is logged and treated
/// as empty, matching the tolerant load the dashboard feed has always had.
#[must_use]
pub fn load(path: &Path) -> Vec<Record> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no prior snapshot — starting empty");
            return Vec::new();
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "snapshot unreadable — starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Snapshot>(&content) {
        Ok(snapshot) => snapshot.data,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "snapshot corrupt — starting empty");
            Vec::new()
        }
    }
}

/// Persists `records` as the new snapshot at `path`, stamping the update
/// time.
///
/// # Errors
///
/// Returns [`IngestError`] if the snapshot cannot be serialized, written, or
/// renamed into place.
pub fn save(path: &Path, records: &[Record]) -> Result<(), IngestError> {
    let snapshot = Snapshot {
        last_updated: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        data: records.to_vec(),
    };
    let rendered =
        serde_json::to_string_pretty(&snapshot).map_err(IngestError::SnapshotSerialize)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string());
    let tmp_path = path.with_file_name(format!("{file_name}.tmp"));

    std::fs::write(&tmp_path, rendered).map_err(|e| IngestError::SnapshotIo {
        path: tmp_path.display().to_string(),
        source: e,
    })?;
    std::fs::rename(&tmp_path, path).map_err(|e| IngestError::SnapshotIo {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), count = records.len(), "snapshot saved");
    Ok(())
}
