//! # risk-config
//!
//! Layered configuration loading for the risk reporting API using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RISKMGR_*` prefix, `__` as separator)
//! 2. An explicit file passed on the command line, else `./riskmgr.toml`
//! 3. User-level `~/.config/riskmgr/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! `RISKMGR_DATABASE__URL` -> `database.url`,
//! `RISKMGR_REPORTING__CLOSED_STATUS_ID` -> `reporting.closed_status_id`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use risk_config::RiskConfig;
//!
//! let config = RiskConfig::load_with_dotenv(None).expect("config");
//! if config.database.is_remote() {
//!     println!("remote store: {}", config.database.url);
//! }
//! ```

mod database;
mod error;
mod reporting;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use reporting::ReportingConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file name.
const LOCAL_CONFIG_FILE: &str = "riskmgr.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RiskConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub reporting: ReportingConfig,
}

impl RiskConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is
    /// invalid.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(config_file).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is
    /// invalid.
    pub fn load_with_dotenv(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(config_file)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can extract from it directly or layer providers on top.
    pub fn figment(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Explicit or project-local config
        match config_file {
            Some(path) => figment = figment.merge(Toml::file(path)),
            None => {
                let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
                if local_path.exists() {
                    figment = figment.merge(Toml::file(local_path));
                }
            }
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("RISKMGR_").split("__"))
    }

    /// Check cross-field constraints figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an invalid heatmap scale, a
    /// non-positive closed status id, or a zero query timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.reporting.scale()?;
        self.reporting.closed_status_id()?;
        if self.database.query_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.query_timeout_ms".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if !self.database.url.is_empty() && self.database.auth_token.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "database (url set without auth_token)".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("riskmgr").join("config.toml"))
    }
}
