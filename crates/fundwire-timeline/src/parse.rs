//! Traversal of the third-party timeline JSON tree into [`TimelinePost`]s.
//!
//! The upstream schema nests the timeline under one of two roots depending on
//! the endpoint revision; entries that fail to yield an id and text are
//! skipped rather than failing the batch.

use fundwire_core::TimelinePost;
use serde_json::Value;

/// Extracts up to `max_items` posts from a raw timeline payload, in timeline
/// order. `fallback_handle` is used for the post URL when the entry does not
/// carry a screen name.
pub(crate) fn posts_from_timeline(
    payload: &Value,
    fallback_handle: &str,
    max_items: usize,
) -> Vec<TimelinePost> {
    let mut posts = Vec::new();

    let roots = [
        payload.pointer("/user_result/result"),
        payload.pointer("/data/user_result/result"),
    ];
    let instructions = roots.iter().flatten().find_map(|root| {
        let instructions = root
            .pointer("/timeline_response/timeline/instructions")?
            .as_array()?;
        (!instructions.is_empty()).then_some(instructions)
    });
    let Some(instructions) = instructions else {
        return posts;
    };

    for instruction in instructions {
        if instruction.get("__typename").and_then(Value::as_str) != Some("TimelineAddEntries") {
            continue;
        }
        let Some(entries) = instruction.get("entries").and_then(Value::as_array) else {
            continue;
        };
        for entry in entries {
            if let Some(post) = post_from_entry(entry, fallback_handle) {
                posts.push(post);
                if posts.len() >= max_items {
                    return posts;
                }
            }
        }
    }

    posts
}

fn post_from_entry(entry: &Value, fallback_handle: &str) -> Option<TimelinePost> {
    let tweet = entry.pointer("/content/content/tweetResult/result")?;

    let id = tweet.get("rest_id").and_then(Value::as_str)?;
    if id.is_empty() {
        return None;
    }

    // Long posts carry their full text in the note tweet; everything else in
    // the legacy payload.
    let text = tweet
        .pointer("/note_tweet/note_tweet_results/result/text")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .or_else(|| tweet.pointer("/legacy/full_text").and_then(Value::as_str))?
        .trim();
    if text.is_empty() {
        return None;
    }

    let screen_name = tweet
        .pointer("/core/user_result/result/legacy/screen_name")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(fallback_handle);

    let media = tweet
        .pointer("/legacy/entities/media")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|m| m.get("media_url_https").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Some(TimelinePost {
        id: id.to_string(),
        text: text.to_string(),
        url: format!("https://x.com/{screen_name}/status/{id}"),
        media,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tweet_entry(id: &str, text: &str) -> Value {
        json!({
            "content": { "content": { "tweetResult": { "result": {
                "rest_id": id,
                "legacy": { "full_text": text },
                "core": { "user_result": { "result": { "legacy": { "screen_name": "acct" } } } }
            } } } }
        })
    }

    fn timeline(entries: Vec<Value>) -> Value {
        json!({
            "user_result": { "result": { "timeline_response": { "timeline": {
                "instructions": [
                    { "__typename": "TimelinePinEntry" },
                    { "__typename": "TimelineAddEntries", "entries": entries }
                ]
            } } } }
        })
    }

    #[test]
    fn extracts_posts_in_timeline_order() {
        let payload = timeline(vec![tweet_entry("1", "first"), tweet_entry("2", "second")]);
        let posts = posts_from_timeline(&payload, "acct", 30);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, "1");
        assert_eq!(posts[0].text, "first");
        assert_eq!(posts[0].url, "https://x.com/acct/status/1");
        assert_eq!(posts[1].id, "2");
    }

    #[test]
    fn nested_data_root_also_traversed() {
        let inner = timeline(vec![tweet_entry("7", "nested")]);
        let payload = json!({ "data": inner });
        let posts = posts_from_timeline(&payload, "acct", 30);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "7");
    }

    #[test]
    fn note_tweet_text_preferred_over_legacy() {
        let entry = json!({
            "content": { "content": { "tweetResult": { "result": {
                "rest_id": "9",
                "note_tweet": { "note_tweet_results": { "result": { "text": "the long form" } } },
                "legacy": { "full_text": "the long form…" }
            } } } }
        });
        let posts = posts_from_timeline(&timeline(vec![entry]), "acct", 30);
        assert_eq!(posts[0].text, "the long form");
    }

    #[test]
    fn missing_screen_name_falls_back_to_queried_handle() {
        let entry = json!({
            "content": { "content": { "tweetResult": { "result": {
                "rest_id": "3",
                "legacy": { "full_text": "hello" }
            } } } }
        });
        let posts = posts_from_timeline(&timeline(vec![entry]), "queried", 30);
        assert_eq!(posts[0].url, "https://x.com/queried/status/3");
    }

    #[test]
    fn media_urls_collected_in_order() {
        let entry = json!({
            "content": { "content": { "tweetResult": { "result": {
                "rest_id": "4",
                "legacy": {
                    "full_text": "with media",
                    "entities": { "media": [
                        { "media_url_https": "https://pbs.example/a.jpg" },
                        { "media_url_https": "https://pbs.example/b.jpg" }
                    ] }
                }
            } } } }
        });
        let posts = posts_from_timeline(&timeline(vec![entry]), "acct", 30);
        assert_eq!(
            posts[0].media,
            vec!["https://pbs.example/a.jpg", "https://pbs.example/b.jpg"]
        );
    }

    #[test]
    fn entries_without_id_or_text_skipped() {
        let no_id = json!({
            "content": { "content": { "tweetResult": { "result": {
                "legacy": { "full_text": "orphan" }
            } } } }
        });
        let no_text = json!({
            "content": { "content": { "tweetResult": { "result": { "rest_id": "5" } } } }
        });
        let payload = timeline(vec![no_id, no_text, tweet_entry("6", "kept")]);
        let posts = posts_from_timeline(&payload, "acct", 30);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "6");
    }

    #[test]
    fn max_items_bounds_the_batch() {
        let entries = (0..10)
            .map(|i| tweet_entry(&i.to_string(), "text"))
            .collect();
        let posts = posts_from_timeline(&timeline(entries), "acct", 3);
        assert_eq!(posts.len(), 3);
    }

    #[test]
    fn unrecognized_payload_yields_empty() {
        assert!(posts_from_timeline(&json!({"unexpected": true}), "acct", 30).is_empty());
        assert!(posts_from_timeline(&json!(null), "acct", 30).is_empty());
    }
}
