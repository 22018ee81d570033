//! Service layer for read-only risk reporting.
//!
//! `RiskService` wraps `RiskDb` (raw database access) and the reporting
//! settings that shape the summaries. All repo and report methods are
//! implemented as `impl RiskService` blocks in `repos/` and `reports/`.

use risk_config::{ConfigError, ReportingConfig, RiskConfig};
use risk_core::enums::HeatmapBasis;
use risk_core::errors::CoreError;
use risk_core::scale::Scale;

use crate::RiskDb;
use crate::error::DatabaseError;

fn invalid_config(e: ConfigError) -> DatabaseError {
    DatabaseError::Core(CoreError::Other(e.into()))
}

/// Settings that decide how summaries are shaped and which risks they count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportSettings {
    pub scale: Scale,
    pub basis: HeatmapBasis,
    /// Risks in this status are outside the heatmap and dashboard scope.
    pub closed_status_id: Option<i64>,
}

impl ReportSettings {
    /// Build validated settings from the `reporting` config section.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` if the scale bounds or the closed
    /// status id are invalid.
    pub fn from_config(config: &ReportingConfig) -> Result<Self, DatabaseError> {
        Ok(Self {
            scale: config.scale().map_err(invalid_config)?,
            basis: config.heatmap_basis,
            closed_status_id: config.closed_status_id().map_err(invalid_config)?,
        })
    }
}

/// Read-only access to the risk register plus its aggregate reports.
pub struct RiskService {
    db: RiskDb,
    settings: ReportSettings,
}

impl RiskService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `settings` - Heatmap scale, basis and reporting scope.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(
        db_path: &str,
        query_timeout: std::time::Duration,
        settings: ReportSettings,
    ) -> Result<Self, DatabaseError> {
        let db = RiskDb::open_local(db_path, query_timeout).await?;
        Ok(Self { db, settings })
    }

    /// Create a service backed by a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established.
    pub async fn new_remote(
        url: &str,
        auth_token: &str,
        query_timeout: std::time::Duration,
        settings: ReportSettings,
    ) -> Result<Self, DatabaseError> {
        let db = RiskDb::open_remote(url, auth_token, query_timeout).await?;
        Ok(Self { db, settings })
    }

    /// Open the store described by `config`: remote when `database.url` is
    /// set, otherwise the local file at `database.local_path`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the configuration is invalid or the store
    /// cannot be opened.
    pub async fn from_config(config: &RiskConfig) -> Result<Self, DatabaseError> {
        config.validate().map_err(invalid_config)?;
        let settings = ReportSettings::from_config(&config.reporting)?;
        let timeout = config.database.query_timeout();
        if config.database.is_remote() {
            Self::new_remote(
                &config.database.url,
                &config.database.auth_token,
                timeout,
                settings,
            )
            .await
        } else {
            Self::new_local(&config.database.local_path, timeout, settings).await
        }
    }

    /// Create from an existing `RiskDb` (for testing).
    #[must_use]
    pub const fn from_db(db: RiskDb, settings: ReportSettings) -> Self {
        Self { db, settings }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &RiskDb {
        &self.db
    }

    #[must_use]
    pub const fn settings(&self) -> &ReportSettings {
        &self.settings
    }

    /// SQL fragment restricting risks to the reporting scope.
    ///
    /// Returns an empty clause when no closed status is configured. A risk
    /// without a status is always in scope.
    pub(crate) fn scope_clause(&self, param_idx: usize) -> (String, Vec<libsql::Value>) {
        match self.settings.closed_status_id {
            Some(closed) => (
                format!("(r.status_id IS NULL OR r.status_id <> ?{param_idx})"),
                vec![libsql::Value::Integer(closed)],
            ),
            None => (String::new(), Vec::new()),
        }
    }
}
