//! HTTP client for the `twttrapi` RapidAPI timeline endpoint.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use fundwire_core::TimelinePost;

use crate::error::TimelineError;
use crate::parse::posts_from_timeline;

const DEFAULT_BASE_URL: &str = "https://twttrapi.p.rapidapi.com";
const RAPIDAPI_HOST: &str = "twttrapi.p.rapidapi.com";

/// Client for fetching a user's recent posts.
///
/// Use [`TimelineClient::new`] for production or
/// [`TimelineClient::with_base_url`] to point at a mock server in tests.
pub struct TimelineClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TimelineClient {
    /// Creates a new client pointed at the production RapidAPI host.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, TimelineError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, TimelineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("fundwire/0.1 (timeline-ingest)")
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Fetches up to `max_items` recent posts for `handle`, in timeline
    /// order.
    ///
    /// Fetch failures (non-2xx, network error, malformed payload) are logged
    /// and collapse to an empty batch — one dead source must not abort the
    /// run, and the items will simply be fetched again next time.
    pub async fn fetch_user_posts(&self, handle: &str, max_items: usize) -> Vec<TimelinePost> {
        match self.request_timeline(handle).await {
            Ok(payload) => {
                let posts = posts_from_timeline(&payload, handle, max_items);
                tracing::debug!(handle, count = posts.len(), "fetched timeline posts");
                posts
            }
            Err(err) => {
                tracing::warn!(handle, error = %err, "timeline fetch failed");
                Vec::new()
            }
        }
    }

    async fn request_timeline(&self, handle: &str) -> Result<Value, TimelineError> {
        let url = format!("{}/user-tweets", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", RAPIDAPI_HOST)
            .query(&[("username", handle)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TimelineError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TimelineError::Deserialize {
            context: format!("user-tweets(username={handle})"),
            source: e,
        })
    }
}
