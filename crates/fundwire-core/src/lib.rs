//! Shared types and configuration for fundwire.
//!
//! Holds the data model (timeline posts, records, structured fields, the
//! persisted snapshot shape), the application configuration loaded from
//! environment variables, and the watched-accounts file loaded from YAML.

pub mod app_config;
pub mod config;
pub mod sources;
pub mod types;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use sources::{load_sources, SourceAccount, SourcesFile};
pub use types::{
    is_sentinel, DashboardRow, HasToken, Record, RewriteOutcome, StructuredFields, TimelinePost,
    SENTINEL,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read sources file {path}: {source}")]
    SourcesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse sources file: {0}")]
    SourcesFileParse(#[from] serde_yaml::Error),

    #[error("invalid sources config: {0}")]
    Validation(String),
}
