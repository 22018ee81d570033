//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them when a
//! local database is opened. All statements use `IF NOT EXISTS` for
//! idempotent re-running.

use crate::RiskDb;
use crate::error::DatabaseError;

/// Initial schema: 14 tables, 8 indexes.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl RiskDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
