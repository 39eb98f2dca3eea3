//! The `publish` subcommand: WordPress pass over the snapshot.

use fundwire_core::AppConfig;
use fundwire_ingest::snapshot;
use fundwire_publish::{publish_records, WordPressClient};

pub(crate) async fn execute(config: &AppConfig) -> anyhow::Result<()> {
    let (Some(url), Some(user), Some(password)) =
        (&config.wp_url, &config.wp_user, &config.wp_app_password)
    else {
        anyhow::bail!("publishing requires WP_API_URL, WP_USER, and WP_APP_PASS to be set");
    };

    let client = WordPressClient::new(url, user, password, config.request_timeout_secs)?;

    let mut records = snapshot::load(&config.snapshot_path);
    let totals = publish_records(&client, &mut records, config.wp_category_id).await;

    // The published markers are part of the snapshot; save them so the next
    // pass skips what just went out.
    snapshot::save(&config.snapshot_path, &records)?;

    tracing::info!(
        published = totals.published,
        skipped = totals.skipped,
        failed = totals.failed,
        "publish pass complete"
    );
    Ok(())
}
