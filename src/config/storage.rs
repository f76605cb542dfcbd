//! Local storage configuration

use std::path::PathBuf;

use serde::Deserialize;

use super::error::ValidationError;

/// Where the CLI keeps its local state
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for the file-backed store
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
}

fn default_dir() -> PathBuf {
    PathBuf::from("./.wotatoken")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { dir: default_dir() }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("WOTATOKEN__STORAGE__DIR"));
        }
        Ok(())
    }
}
