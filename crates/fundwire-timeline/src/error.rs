use thiserror::Error;

/// Errors from the timeline API client. These never escape
/// [`crate::TimelineClient::fetch_user_posts`] — fetch failures collapse to
/// an empty batch so one dead source cannot abort a run — but they are
/// surfaced in the warning logs.
#[derive(Debug, Error)]
pub enum TimelineError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The timeline API answered with a non-2xx status.
    #[error("timeline API error ({status}): {body}")]
    ApiStatus { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("malformed timeline payload for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
