use thiserror::Error;

/// Errors returned by the Gemini API client.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429 — retryable after the advertised cooldown (whole seconds)
    /// when the provider sent one.
    #[error("rate limited (retry hint: {retry_after_secs:?}s)")]
    RateLimited { retry_after_secs: Option<u64> },

    /// Any other non-2xx status. Not retried.
    #[error("Gemini API error ({status}): {body}")]
    ApiStatus { status: u16, body: String },

    /// The response body could not be deserialized into the expected envelope.
    #[error("malformed Gemini response for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A 2xx envelope with no candidate text.
    #[error("Gemini response carried no candidate text")]
    EmptyResponse,
}
