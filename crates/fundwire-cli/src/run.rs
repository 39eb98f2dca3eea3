//! The `run` subcommand: one full ingest pass.

use fundwire_core::AppConfig;
use fundwire_gemini::{GeminiClient, GeminiRewriter};
use fundwire_ingest::snapshot;
use fundwire_timeline::TimelineClient;

pub(crate) async fn execute(config: &AppConfig) -> anyhow::Result<()> {
    let sources_file = fundwire_core::load_sources(&config.sources_path)?;
    let handles: Vec<String> = sources_file
        .accounts
        .iter()
        .map(|a| a.normalized_handle().to_string())
        .collect();

    let fetcher = TimelineClient::new(&config.rapidapi_key, config.request_timeout_secs)?;
    let gemini = GeminiClient::new(&config.gemini_api_key, config.request_timeout_secs)?;
    let rewriter = GeminiRewriter::new(
        gemini,
        config.gemini_max_retries,
        config.gemini_retry_cooldown_secs,
    );

    let accumulated = snapshot::load(&config.snapshot_path);
    let before = accumulated.len();

    let records = fundwire_ingest::run(
        &fetcher,
        &rewriter,
        &handles,
        accumulated,
        config.max_items_per_source,
    )
    .await;

    // Persist only after the whole batch completed: a killed run leaves the
    // prior snapshot intact.
    snapshot::save(&config.snapshot_path, &records)?;

    tracing::info!(
        sources = handles.len(),
        total = records.len(),
        collected = records.len().saturating_sub(before),
        "ingest run complete"
    );
    Ok(())
}
