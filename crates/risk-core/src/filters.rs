//! Typed listing filters.
//!
//! An absent field means "no restriction". Filters are validated before any
//! query is issued; the repository layer calls `validate()` itself, so a
//! caller that skips it still cannot reach the store with a bad value.

use crate::enums::Classification;
use crate::errors::CoreError;

/// Check that an identifier is a positive integer.
///
/// # Errors
///
/// Returns `CoreError::InvalidFilter` naming `field` when `id <= 0`.
pub fn validate_id(field: &str, id: i64) -> Result<i64, CoreError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(CoreError::invalid_filter(
            field,
            format!("must be a positive integer, got {id}"),
        ))
    }
}

fn validate_opt_id(field: &str, id: Option<i64>) -> Result<(), CoreError> {
    id.map_or(Ok(()), |id| validate_id(field, id).map(|_| ()))
}

/// Filter for `list_risks`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskFilter {
    pub country_id: Option<i64>,
    pub status_id: Option<i64>,
    pub classification: Option<Classification>,
}

impl RiskFilter {
    /// # Errors
    ///
    /// Returns `CoreError::InvalidFilter` for a non-positive id.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_opt_id("country_id", self.country_id)?;
        validate_opt_id("status_id", self.status_id)
    }
}

/// Filter for `list_users`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role_id: Option<i64>,
    pub country_id: Option<i64>,
    pub is_active: Option<bool>,
}

impl UserFilter {
    /// # Errors
    ///
    /// Returns `CoreError::InvalidFilter` for a non-positive id.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_opt_id("role_id", self.role_id)?;
        validate_opt_id("country_id", self.country_id)
    }
}

/// Filter for `list_action_plans`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionPlanFilter {
    pub status: Option<String>,
}

impl ActionPlanFilter {
    /// # Errors
    ///
    /// Returns `CoreError::InvalidFilter` when `status` is present but blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        match &self.status {
            Some(status) if status.trim().is_empty() => Err(CoreError::invalid_filter(
                "status",
                "must not be empty",
            )),
            _ => Ok(()),
        }
    }
}
