//! Backing store connection settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_max_attempts() -> u32 {
    3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Service URL (e.g., `libsql://helpdesk-acme.turso.io`).
    #[serde(default)]
    pub url: String,

    /// API key sent with every request.
    #[serde(default)]
    pub api_key: String,

    /// Attempts per request when the store reports a transient failure.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl StoreConfig {
    /// Both the URL and the API key are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.api_key.trim().is_empty()
    }

    /// Fail unless the store can be reached with these settings.
    ///
    /// # Errors
    ///
    /// `NotConfigured` when the URL or API key is missing, `InvalidValue` when
    /// `max_attempts` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "store".into(),
            });
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.max_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
