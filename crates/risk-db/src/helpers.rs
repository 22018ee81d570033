//! Row-to-record parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed records.
//! These helpers isolate the parsing logic: nullable TEXT columns, SQLite's
//! 0/1 booleans, loosely typed score columns, and the datetime spellings
//! found in the store (`datetime('now')`, RFC 3339, naive ISO 8601).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::DatabaseError;

/// Parse a TEXT column as `DateTime<Utc>`.
///
/// Handles RFC 3339 (`"2026-02-09T14:30:00+00:00"`) and naive timestamps
/// with either a `T` or a space separator and optional fractional seconds
/// (`"2026-02-09 14:30:00"`, `"2026-02-09T14:30:00.123"`). Naive values are
/// taken as UTC.
///
/// # Errors
///
/// Returns `DatabaseError::Decode` if the string matches none of these formats.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Decode(format!("Failed to parse datetime '{s}': {e}")))
}

/// Read a nullable datetime column.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails or a non-empty value
/// cannot be parsed.
pub fn get_opt_datetime(row: &libsql::Row, idx: i32) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    get_opt_string(row, idx)?
        .map(|s| parse_datetime(&s))
        .transpose()
}

/// Read a nullable `YYYY-MM-DD` column.
///
/// A datetime value is accepted and truncated to its date part.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails or the value is not a date.
pub fn get_opt_date(row: &libsql::Row, idx: i32) -> Result<Option<NaiveDate>, DatabaseError> {
    get_opt_string(row, idx)?
        .map(|s| {
            let date_part = s.get(..10).unwrap_or(&s);
            NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                .map_err(|e| DatabaseError::Decode(format!("Failed to parse date '{s}': {e}")))
        })
        .transpose()
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read a nullable score column.
///
/// `SQLite` keeps whatever type was written, so an INTEGER column can hold a
/// REAL or TEXT value. Anything that is not an integer reads as `None` and is
/// logged, leaving the risk unplaceable instead of failing the whole read.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_score(row: &libsql::Row, idx: i32) -> Result<Option<i64>, DatabaseError> {
    match row.get_value(idx)? {
        libsql::Value::Integer(v) => Ok(Some(v)),
        libsql::Value::Null => Ok(None),
        other => {
            tracing::warn!(column = idx, value = ?other, "non-integer score ignored");
            Ok(None)
        }
    }
}

/// Read an INTEGER 0/1 column as `bool`. NULL reads as `false`.
///
/// # Errors
///
/// Returns `DatabaseError::Decode` for TEXT or BLOB values, or
/// `DatabaseError` if the column read fails.
pub fn get_bool(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    match row.get_value(idx)? {
        libsql::Value::Integer(v) => Ok(v != 0),
        libsql::Value::Null => Ok(false),
        other => Err(DatabaseError::Decode(format!("expected 0/1 flag, got {other:?}"))),
    }
}

/// Read a `COUNT(*)`-style column as `u64`.
///
/// # Errors
///
/// Returns `DatabaseError::Decode` for a negative value.
pub fn get_count(row: &libsql::Row, idx: i32) -> Result<u64, DatabaseError> {
    let n = row.get::<i64>(idx)?;
    u64::try_from(n).map_err(|_| DatabaseError::Decode(format!("negative count {n}")))
}

/// Round to one decimal place, as the dashboard displays averages.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
