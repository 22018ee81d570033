//! Database error types for risk-db.

use risk_core::errors::CoreError;
use thiserror::Error;

/// Errors from repository and report operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Not-found and invalid-filter signals raised before or after a query.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The store could not be reached or a query did not complete in time.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Underlying libSQL error (connection, statement, or transport failure).
    #[error("Storage unavailable: {0}")]
    LibSql(#[from] libsql::Error),

    /// A row held data that does not fit the record type.
    #[error("Failed to decode row: {0}")]
    Decode(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,
}

impl DatabaseError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Core(CoreError::NotFound { .. }))
    }

    #[must_use]
    pub const fn is_invalid_filter(&self) -> bool {
        matches!(self, Self::Core(CoreError::InvalidFilter { .. }))
    }

    #[must_use]
    pub const fn is_storage_unavailable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_) | Self::LibSql(_))
    }
}
