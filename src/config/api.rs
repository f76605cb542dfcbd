//! Code service API configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::wotatokens::{WotatokensConfig, DEFAULT_BASE_URL};

/// wotatokens API configuration
#[derive(Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the code service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Shared API key, only needed by admin commands
    #[serde(default = "empty_api_key")]
    pub api_key: SecretString,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn empty_api_key() -> SecretString {
    SecretString::new(String::new())
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: empty_api_key(),
        }
    }
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &if self.has_api_key() { "[REDACTED]" } else { "" })
            .finish()
    }
}

impl ApiConfig {
    /// Validate the base URL
    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingRequired("WOTATOKEN__API__BASE_URL"));
        }
        let has_host = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .map_or(false, |rest| !rest.is_empty());
        if !has_host {
            return Err(ValidationError::InvalidBaseUrl(url.to_string()));
        }
        Ok(())
    }

    /// True when a non-blank API key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }

    /// Adapter configuration for admin commands. Requires the API key.
    pub fn registry_config(&self) -> Result<WotatokensConfig, ValidationError> {
        self.validate()?;
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("WOTATOKEN__API__API_KEY"));
        }
        let api_key = self.api_key.expose_secret().trim();
        Ok(WotatokensConfig::new(api_key).with_base_url(self.base_url.trim()))
    }
}
