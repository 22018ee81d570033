//! Data store connection configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default local database file.
fn default_local_path() -> String {
    "riskmgr.db".to_string()
}

/// Default per-query timeout in milliseconds.
const fn default_query_timeout_ms() -> u64 {
    30_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Remote database URL (e.g., `libsql://risks-acme.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,

    /// Local database file used when no remote is configured.
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Upper bound on a single query, in milliseconds.
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: String::new(),
            local_path: default_local_path(),
            query_timeout_ms: default_query_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    /// Check if a remote database is configured (URL and token both set).
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    pub const fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_local() {
        let config = DatabaseConfig::default();
        assert!(!config.is_remote());
        assert_eq!(config.local_path, "riskmgr.db");
        assert_eq!(config.query_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn remote_requires_url_and_token() {
        let mut config = DatabaseConfig {
            url: "libsql://risks.turso.io".into(),
            ..Default::default()
        };
        assert!(!config.is_remote());

        config.auth_token = "token".into();
        assert!(config.is_remote());
    }
}
