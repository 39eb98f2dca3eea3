use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub rapidapi_key: String,
    pub gemini_api_key: String,
    pub wp_url: Option<String>,
    pub wp_user: Option<String>,
    pub wp_app_password: Option<String>,
    pub wp_category_id: i64,
    pub snapshot_path: PathBuf,
    pub sources_path: PathBuf,
    pub max_items_per_source: usize,
    pub gemini_max_retries: u32,
    pub gemini_retry_cooldown_secs: u64,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("rapidapi_key", &"[redacted]")
            .field("gemini_api_key", &"[redacted]")
            .field("wp_url", &self.wp_url)
            .field("wp_user", &self.wp_user)
            .field(
                "wp_app_password",
                &self.wp_app_password.as_ref().map(|_| "[redacted]"),
            )
            .field("wp_category_id", &self.wp_category_id)
            .field("snapshot_path", &self.snapshot_path)
            .field("sources_path", &self.sources_path)
            .field("max_items_per_source", &self.max_items_per_source)
            .field("gemini_max_retries", &self.gemini_max_retries)
            .field(
                "gemini_retry_cooldown_secs",
                &self.gemini_retry_cooldown_secs,
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .finish()
    }
}
