//! Query-string and path parsing into typed, validated filters.
//!
//! Raw query structs accept every value as text so that malformed input
//! surfaces as `InvalidFilter` (400 with a problem body) instead of the
//! extractor's own rejection.

use risk_core::enums::Classification;
use risk_core::errors::CoreError;
use risk_core::filters::{ActionPlanFilter, RiskFilter, UserFilter, validate_id};
use serde::Deserialize;

/// `GET /api/risks` query.
#[derive(Debug, Default, Deserialize)]
pub struct RiskQuery {
    pub country_id: Option<String>,
    pub status_id: Option<String>,
    pub classification: Option<String>,
}

/// `GET /api/users` query.
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub role_id: Option<String>,
    pub country_id: Option<String>,
    pub is_active: Option<String>,
}

/// `GET /api/action-plans` query.
#[derive(Debug, Default, Deserialize)]
pub struct ActionPlanQuery {
    pub status: Option<String>,
}

/// Treat an empty query value the same as an absent one.
fn present(raw: Option<&String>) -> Option<&str> {
    raw.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Parse a positive integer identifier.
///
/// # Errors
///
/// Returns `CoreError::InvalidFilter` naming `field` if `raw` is not a
/// positive integer.
pub fn parse_id(field: &str, raw: &str) -> Result<i64, CoreError> {
    let id = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| CoreError::invalid_filter(field, format!("'{raw}' is not an integer")))?;
    validate_id(field, id)
}

fn parse_opt_id(field: &str, raw: Option<&String>) -> Result<Option<i64>, CoreError> {
    present(raw).map(|s| parse_id(field, s)).transpose()
}

/// `is_active` defaults to `true`; `all` lifts the restriction.
fn parse_is_active(raw: Option<&String>) -> Result<Option<bool>, CoreError> {
    let Some(value) = present(raw) else {
        return Ok(Some(true));
    };
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(Some(true)),
        "false" | "0" | "no" => Ok(Some(false)),
        "all" => Ok(None),
        _ => Err(CoreError::invalid_filter(
            "is_active",
            format!("'{value}' is not a boolean"),
        )),
    }
}

impl RiskQuery {
    /// Convert into a validated [`RiskFilter`].
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidFilter` for a malformed id or an unknown
    /// classification.
    pub fn into_filter(self) -> Result<RiskFilter, CoreError> {
        let filter = RiskFilter {
            country_id: parse_opt_id("country_id", self.country_id.as_ref())?,
            status_id: parse_opt_id("status_id", self.status_id.as_ref())?,
            classification: present(self.classification.as_ref())
                .map(str::parse::<Classification>)
                .transpose()?,
        };
        filter.validate()?;
        Ok(filter)
    }
}

impl UserQuery {
    /// Convert into a validated [`UserFilter`].
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidFilter` for a malformed id or flag.
    pub fn into_filter(self) -> Result<UserFilter, CoreError> {
        let filter = UserFilter {
            role_id: parse_opt_id("role_id", self.role_id.as_ref())?,
            country_id: parse_opt_id("country_id", self.country_id.as_ref())?,
            is_active: parse_is_active(self.is_active.as_ref())?,
        };
        filter.validate()?;
        Ok(filter)
    }
}

impl ActionPlanQuery {
    /// Convert into a validated [`ActionPlanFilter`].
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidFilter` if the filter does not validate.
    pub fn into_filter(self) -> Result<ActionPlanFilter, CoreError> {
        let filter = ActionPlanFilter {
            status: present(self.status.as_ref()).map(str::to_string),
        };
        filter.validate()?;
        Ok(filter)
    }
}
