//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! Wraps `reqwest` with the API-key query parameter, typed envelope
//! deserialization, and rate-limit hint parsing. Retry policy lives in
//! [`crate::rewriter`]; this client reports a single attempt's outcome.

use std::time::Duration;

use reqwest::Client;

use crate::error::GeminiError;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Client for the Gemini text-generation API.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a new client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GeminiError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom endpoint URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GeminiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("fundwire/0.1 (announcement-rewrite)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.to_owned(),
        })
    }

    /// Sends one prompt and returns the first candidate's text.
    ///
    /// # Errors
    ///
    /// - [`GeminiError::RateLimited`] on HTTP 429, carrying the provider's
    ///   retry hint (body `RetryInfo.retryDelay`, else `Retry-After` header)
    ///   when one was sent.
    /// - [`GeminiError::ApiStatus`] on any other non-2xx status.
    /// - [`GeminiError::Http`] on network failure.
    /// - [`GeminiError::Deserialize`] / [`GeminiError::EmptyResponse`] when
    ///   the 2xx body does not carry candidate text.
    pub async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateContentRequest::from_prompt(prompt);

        let response = self
            .client
            .post(&self.base_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            let header_hint = retry_after_header_secs(response.headers());
            let body = response.text().await.unwrap_or_default();
            let retry_after_secs = retry_delay_from_body(&body).or(header_hint);
            return Err(GeminiError::RateLimited { retry_after_secs });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let envelope: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| GeminiError::Deserialize {
                context: "generateContent".to_string(),
                source: e,
            })?;

        envelope.first_text().ok_or(GeminiError::EmptyResponse)
    }
}

/// Parses the `Retry-After` header as whole seconds.
fn retry_after_header_secs(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
}

/// Parses the machine-readable retry hint Gemini puts in the 429 body:
/// `error.details[]` entry of type `google.rpc.RetryInfo` with a
/// `retryDelay` like `"6s"` or `"6.5s"`. Fractions round up.
fn retry_delay_from_body(body: &str) -> Option<u64> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let details = value.get("error")?.get("details")?.as_array()?;
    let retry_info = details.iter().find(|d| {
        d.get("@type")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|t| t.ends_with("RetryInfo"))
    })?;
    let delay = retry_info
        .get("retryDelay")?
        .as_str()?
        .trim()
        .trim_end_matches('s');
    let secs = delay.parse::<f64>().ok()?;
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(secs.ceil() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_delay_parsed_from_retry_info_detail() {
        let body = r#"{"error":{"code":429,"details":[
            {"@type":"type.googleapis.com/google.rpc.Help"},
            {"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"12s"}
        ]}}"#;
        assert_eq!(retry_delay_from_body(body), Some(12));
    }

    #[test]
    fn fractional_retry_delay_rounds_up() {
        let body = r#"{"error":{"details":[
            {"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"2.3s"}
        ]}}"#;
        assert_eq!(retry_delay_from_body(body), Some(3));
    }

    #[test]
    fn missing_retry_info_yields_none() {
        assert_eq!(retry_delay_from_body(r#"{"error":{"code":429}}"#), None);
        assert_eq!(retry_delay_from_body("not json"), None);
    }

    #[test]
    fn negative_retry_delay_rejected() {
        let body = r#"{"error":{"details":[
            {"@type":"type.googleapis.com/google.rpc.RetryInfo","retryDelay":"-4s"}
        ]}}"#;
        assert_eq!(retry_delay_from_body(body), None);
    }
}
