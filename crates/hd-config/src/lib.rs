//! # hd-config
//!
//! Layered configuration loading for Helpdesk using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`HELPDESK_*` prefix, `__` as separator)
//! 2. Project-level `.helpdesk/config.toml`
//! 3. User-level `~/.config/helpdesk/config.toml`
//! 4. Built-in defaults
//!
//! `HELPDESK_STORE__URL` maps to `store.url`, `HELPDESK_STORE__API_KEY` to
//! `store.api_key`, and so on.
//!
//! ```no_run
//! use hd_config::HelpdeskConfig;
//!
//! let config = HelpdeskConfig::load_with_dotenv().expect("config");
//! config.require_store().expect("store url and api key");
//! ```

mod error;
mod general;
mod local;
mod store;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use local::LocalConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "HELPDESK_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HelpdeskConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub local: LocalConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl HelpdeskConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env`; see [`Self::load_with_dotenv`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source fails to parse.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load `.env` from the working directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // a missing .env is normal
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// The provider chain, exposed so tests can layer extra providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".helpdesk/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// The store URL and API key must both be set before anything runs.
    ///
    /// # Errors
    ///
    /// See [`StoreConfig::validate`].
    pub fn require_store(&self) -> Result<&StoreConfig, ConfigError> {
        self.store.validate()?;
        Ok(&self.store)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("helpdesk").join("config.toml"))
    }
}
