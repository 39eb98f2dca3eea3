use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One watched account from `sources.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceAccount {
    pub handle: String,
    pub notes: Option<String>,
}

impl SourceAccount {
    /// The handle as the timeline API expects it: no leading `@`.
    #[must_use]
    pub fn normalized_handle(&self) -> &str {
        self.handle.trim().trim_start_matches('@')
    }
}

#[derive(Debug, Deserialize)]
pub struct SourcesFile {
    pub accounts: Vec<SourceAccount>,
}

/// Load and validate the watched-accounts configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation (empty list, blank handle, duplicate handle).
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let sources_file: SourcesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::SourcesFileParse)?;

    validate_sources(&sources_file)?;

    Ok(sources_file)
}

fn validate_sources(sources_file: &SourcesFile) -> Result<(), ConfigError> {
    if sources_file.accounts.is_empty() {
        return Err(ConfigError::Validation(
            "sources file must list at least one account".to_string(),
        ));
    }

    let mut seen_handles = HashSet::new();
    for account in &sources_file.accounts {
        let handle = account.normalized_handle();
        if handle.is_empty() {
            return Err(ConfigError::Validation(
                "account handle must be non-empty".to_string(),
            ));
        }
        if !seen_handles.insert(handle.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate account handle: '{handle}'"
            )));
        }
    }

    Ok(())
}
