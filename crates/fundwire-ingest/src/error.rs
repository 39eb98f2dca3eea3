use thiserror::Error;

/// Errors from the ingest layer. Per-item trouble never surfaces here — it
/// is routine control flow inside the pipeline; only snapshot persistence
/// can fail a run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("snapshot io error for {path}: {source}")]
    SnapshotIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot serialization error: {0}")]
    SnapshotSerialize(#[source] serde_json::Error),
}
