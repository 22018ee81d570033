//! # risk-db
//!
//! libSQL-backed repository access layer and risk aggregator.
//!
//! `RiskDb` owns the database handle and runs every query under a timeout.
//! `RiskService` wraps it with the reporting settings and hosts the
//! read operations: one repo module per entity kind (`repos/`) and one report
//! module per summary view (`reports/`).
//!
//! Nothing in this crate writes to the store. Local databases get the
//! embedded schema applied on open; remote ones are used as provisioned.

pub mod error;
pub mod helpers;
mod migrations;
pub mod reports;
pub mod repos;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

use std::future::Future;
use std::time::Duration;

use error::DatabaseError;
use libsql::Builder;
use libsql::params::IntoParams;

/// Row mapper used by the fetch helpers.
pub type RowMapper<T> = fn(&libsql::Row) -> Result<T, DatabaseError>;

/// Database handle shared by all read operations.
///
/// Holds one libSQL connection; each operation borrows it for its own
/// duration, so nothing outlives the call that used it.
pub struct RiskDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    query_timeout: Duration,
}

impl RiskDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Enables foreign keys and runs migrations.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str, query_timeout: Duration) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let risk_db = Self {
            db,
            conn,
            query_timeout,
        };
        risk_db.run_migrations().await?;
        tracing::debug!(path, "opened local risk database");
        Ok(risk_db)
    }

    /// Open a remote libSQL database. The schema is assumed provisioned.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established.
    pub async fn open_remote(
        url: &str,
        auth_token: &str,
        query_timeout: Duration,
    ) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;
        tracing::debug!(url, "opened remote risk database");
        Ok(Self {
            db,
            conn,
            query_timeout,
        })
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Run a query and map every row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::StorageUnavailable` on timeout, `LibSql` on
    /// query failure, or whatever `map` returns for a bad row.
    pub async fn fetch_all<T, P>(
        &self,
        sql: &str,
        params: P,
        map: RowMapper<T>,
    ) -> Result<Vec<T>, DatabaseError>
    where
        P: IntoParams + Send,
    {
        self.with_timeout(async {
            let mut rows = self.conn.query(sql, params).await?;
            let mut out = Vec::new();
            while let Some(row) = rows.next().await? {
                out.push(map(&row)?);
            }
            Ok(out)
        })
        .await
    }

    /// Run a query and map the first row, if any.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_all`].
    pub async fn fetch_optional<T, P>(
        &self,
        sql: &str,
        params: P,
        map: RowMapper<T>,
    ) -> Result<Option<T>, DatabaseError>
    where
        P: IntoParams + Send,
    {
        self.with_timeout(async {
            let mut rows = self.conn.query(sql, params).await?;
            match rows.next().await? {
                Some(row) => Ok(Some(map(&row)?)),
                None => Ok(None),
            }
        })
        .await
    }

    /// Run a single-value `COUNT(*)` query.
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_all`], plus `NoResult` if no row comes back.
    pub async fn fetch_count<P>(&self, sql: &str, params: P) -> Result<u64, DatabaseError>
    where
        P: IntoParams + Send,
    {
        self.fetch_optional(sql, params, |row| helpers::get_count(row, 0))
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    /// Bound `fut` by the configured query timeout.
    pub(crate) async fn with_timeout<T>(
        &self,
        fut: impl Future<Output = Result<T, DatabaseError>>,
    ) -> Result<T, DatabaseError> {
        tokio::time::timeout(self.query_timeout, fut)
            .await
            .map_err(|_| {
                tracing::warn!(timeout_ms = self.query_timeout.as_millis(), "query timed out");
                DatabaseError::StorageUnavailable(format!(
                    "query exceeded {} ms timeout",
                    self.query_timeout.as_millis()
                ))
            })?
    }
}
