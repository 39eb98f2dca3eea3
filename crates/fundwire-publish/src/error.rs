use thiserror::Error;

/// Errors returned by the WordPress publishing client.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// WordPress answered with a non-2xx status.
    #[error("WordPress API error ({status}): {body}")]
    ApiStatus { status: u16, body: String },

    /// The response body could not be deserialized into the expected shape.
    #[error("malformed WordPress response for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
