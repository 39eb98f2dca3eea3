//! HTTP client for the WordPress REST API (posts + media).

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::PublishError;

/// Client for creating posts and uploading media on one WordPress site,
/// authenticated with an application password.
pub struct WordPressClient {
    client: Client,
    base_url: String,
    user: String,
    app_password: String,
}

#[derive(Debug, Serialize)]
struct NewPost<'a> {
    title: &'a str,
    content: &'a str,
    status: &'a str,
    categories: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    featured_media: Option<i64>,
}

/// The subset of the created-post response fundwire cares about.
#[derive(Debug, Deserialize)]
pub struct CreatedPost {
    pub id: i64,
    pub link: String,
}

#[derive(Debug, Deserialize)]
struct UploadedMedia {
    id: i64,
}

impl WordPressClient {
    /// Creates a client for the WordPress site at `base_url`
    /// (e.g. `https://example.com`).
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        user: &str,
        app_password: &str,
        timeout_secs: u64,
    ) -> Result<Self, PublishError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("fundwire/0.1 (announcement-republish)")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            user: user.to_owned(),
            app_password: app_password.to_owned(),
        })
    }

    /// Creates a published post in the given category.
    ///
    /// # Errors
    ///
    /// - [`PublishError::ApiStatus`] on a non-2xx response.
    /// - [`PublishError::Http`] on network failure.
    /// - [`PublishError::Deserialize`] if the response is not a post object.
    pub async fn create_post(
        &self,
        title: &str,
        content: &str,
        category_id: i64,
        featured_media: Option<i64>,
    ) -> Result<CreatedPost, PublishError> {
        let url = format!("{}/wp-json/wp/v2/posts", self.base_url);
        let body = NewPost {
            title,
            content,
            status: "publish",
            categories: vec![category_id],
            featured_media,
        };

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.user, Some(&self.app_password))
            .json(&body)
            .send()
            .await?;

        let body = Self::success_body(response).await?;
        serde_json::from_str(&body).map_err(|e| PublishError::Deserialize {
            context: "create_post".to_string(),
            source: e,
        })
    }

    /// Re-uploads an image into the WordPress media library by URL and
    /// returns its media id.
    ///
    /// # Errors
    ///
    /// - [`PublishError::ApiStatus`] when the download or upload answers
    ///   non-2xx.
    /// - [`PublishError::Http`] on network failure.
    /// - [`PublishError::Deserialize`] if the upload response is not a media
    ///   object.
    pub async fn upload_media(&self, source_url: &str) -> Result<i64, PublishError> {
        let download = self.client.get(source_url).send().await?;
        let status = download.status();
        if !status.is_success() {
            return Err(PublishError::ApiStatus {
                status: status.as_u16(),
                body: format!("media download failed for {source_url}"),
            });
        }
        let bytes = download.bytes().await?;

        let file_name = source_url
            .rsplit('/')
            .next()
            .filter(|n| !n.is_empty())
            .unwrap_or("attachment.jpg");

        let url = format!("{}/wp-json/wp/v2/media", self.base_url);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.user, Some(&self.app_password))
            .header(
                "Content-Disposition",
                format!("attachment; filename=\"{file_name}\""),
            )
            .header("Content-Type", "application/octet-stream")
            .body(bytes)
            .send()
            .await?;

        let body = Self::success_body(response).await?;
        let media: UploadedMedia =
            serde_json::from_str(&body).map_err(|e| PublishError::Deserialize {
                context: "upload_media".to_string(),
                source: e,
            })?;
        Ok(media.id)
    }

    async fn success_body(response: reqwest::Response) -> Result<String, PublishError> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(PublishError::ApiStatus {
                status: status.as_u16(),
                body,
            })
        }
    }
}
