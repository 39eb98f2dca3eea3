use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the actual environment so it
/// can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_i64 = |var: &str, default: &str| -> Result<i64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<i64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let rapidapi_key = require("RAPIDAPI_KEY")?;
    let gemini_api_key = require("GEMINI_API_KEY")?;

    // WordPress credentials are optional: ingest and export work without
    // them, only the `publish` subcommand requires the full trio.
    let wp_url = lookup("WP_API_URL").ok();
    let wp_user = lookup("WP_USER").ok();
    let wp_app_password = lookup("WP_APP_PASS").ok();
    let wp_category_id = parse_i64("FUNDWIRE_WP_CATEGORY_ID", "1433")?;

    let snapshot_path = PathBuf::from(or_default("FUNDWIRE_SNAPSHOT_PATH", "./results.json"));
    let sources_path = PathBuf::from(or_default(
        "FUNDWIRE_SOURCES_PATH",
        "./config/sources.yaml",
    ));

    let max_items_per_source = parse_usize("FUNDWIRE_MAX_ITEMS_PER_SOURCE", "30")?;
    let gemini_max_retries = parse_u32("FUNDWIRE_GEMINI_MAX_RETRIES", "3")?;
    let gemini_retry_cooldown_secs = parse_u64("FUNDWIRE_GEMINI_RETRY_COOLDOWN_SECS", "6")?;
    let request_timeout_secs = parse_u64("FUNDWIRE_REQUEST_TIMEOUT_SECS", "30")?;
    let log_level = or_default("FUNDWIRE_LOG_LEVEL", "info");

    Ok(AppConfig {
        rapidapi_key,
        gemini_api_key,
        wp_url,
        wp_user,
        wp_app_password,
        wp_category_id,
        snapshot_path,
        sources_path,
        max_items_per_source,
        gemini_max_retries,
        gemini_retry_cooldown_secs,
        request_timeout_secs,
        log_level,
    })
}
