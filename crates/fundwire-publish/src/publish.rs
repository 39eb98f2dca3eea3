//! The republish pass over the accumulated record set.

use chrono::Utc;

use fundwire_core::Record;

use crate::client::WordPressClient;

/// Totals for one publish pass.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PublishTotals {
    pub published: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Publishes every not-yet-published record as a WordPress post, marking
/// successes in place.
///
/// Records already flagged `published` are skipped — the marker is the
/// idempotency guarantee, so re-running the pass never double-posts. A
/// failed record is logged and left unpublished for the next pass; it never
/// aborts the batch. Media upload is best-effort: a post goes out without a
/// featured image rather than not at all.
pub async fn publish_records(
    client: &WordPressClient,
    records: &mut [Record],
    category_id: i64,
) -> PublishTotals {
    let mut totals = PublishTotals::default();

    for record in records.iter_mut() {
        if record.published {
            tracing::debug!(url = %record.url, "already published — skipping");
            totals.skipped += 1;
            continue;
        }

        let featured_media = match record.media.first() {
            Some(media_url) => match client.upload_media(media_url).await {
                Ok(id) => Some(id),
                Err(err) => {
                    tracing::warn!(
                        url = %record.url,
                        media = media_url.as_str(),
                        error = %err,
                        "media upload failed — posting without featured image"
                    );
                    None
                }
            },
            None => None,
        };

        let content = post_content(record);
        match client
            .create_post(record.title(), &content, category_id, featured_media)
            .await
        {
            Ok(post) => {
                record.published = true;
                record.published_at = Some(Utc::now());
                totals.published += 1;
                tracing::info!(url = %record.url, post_link = post.link.as_str(), "published");
            }
            Err(err) => {
                totals.failed += 1;
                tracing::warn!(url = %record.url, error = %err, "publish failed — will retry next pass");
            }
        }
    }

    totals
}

/// Post body: the rewritten announcement with line breaks preserved, plus a
/// source link.
fn post_content(record: &Record) -> String {
    let text = record.text.replace('\n', "<br>\n");
    format!(
        "<p>{text}</p>\n<p>Sumber: <a href=\"{url}\">{url}</a></p>",
        url = record.url
    )
}
