//! The `export` subcommand: dashboard rows from the snapshot.

use std::path::Path;

use anyhow::Context;

use fundwire_core::{AppConfig, DashboardRow};
use fundwire_ingest::snapshot;

pub(crate) fn execute(config: &AppConfig, output: &Path) -> anyhow::Result<()> {
    let records = snapshot::load(&config.snapshot_path);
    let rows: Vec<DashboardRow> = records.iter().map(DashboardRow::from_record).collect();

    let rendered = serde_json::to_string_pretty(&rows)?;
    std::fs::write(output, rendered)
        .with_context(|| format!("writing dashboard rows to {}", output.display()))?;

    tracing::info!(count = rows.len(), path = %output.display(), "dashboard rows exported");
    Ok(())
}
