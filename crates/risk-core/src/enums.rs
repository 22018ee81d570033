//! Enumerations shared by records, filters, and reports.
//!
//! Text-valued columns keep the exact spelling used in the database
//! (`"Significant"`, `"In Progress"`), so these enums serialize with
//! explicit renames instead of `snake_case`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Records that can be looked up by id and reported missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    User,
    Risk,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Risk => "risk",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Residual risk classification assigned by the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Low,
    Moderate,
    Significant,
}

impl Classification {
    pub const ALL: [Self; 3] = [Self::Low, Self::Moderate, Self::Significant];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::Significant => "Significant",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = CoreError;

    /// Case-insensitive: query strings arrive as `significant` as often as
    /// `Significant`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CoreError::invalid_filter(
                    "classification",
                    format!("'{s}' is not one of Low, Moderate, Significant"),
                )
            })
    }
}

// ---------------------------------------------------------------------------
// HeatmapBasis
// ---------------------------------------------------------------------------

/// Which pair of scores places a risk on the heatmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatmapBasis {
    /// Scores after controls are applied.
    #[default]
    Residual,
    /// Scores before controls.
    Inherent,
}

impl HeatmapBasis {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Residual => "residual",
            Self::Inherent => "inherent",
        }
    }

    /// `(likelihood, impact)` column names on the `risks` table.
    #[must_use]
    pub const fn columns(self) -> (&'static str, &'static str) {
        match self {
            Self::Residual => ("residual_likelihood", "residual_impact"),
            Self::Inherent => ("inherent_likelihood", "inherent_impact"),
        }
    }
}

impl fmt::Display for HeatmapBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Action plan statuses
// ---------------------------------------------------------------------------

/// Action plan statuses that count as outstanding work.
pub const OPEN_ACTION_STATUSES: [&str; 2] = ["Open", "In Progress"];

/// Bucket used in status breakdowns for risks without a status.
///
/// Breakdowns are keyed by status name, so a status that is itself named
/// `unassigned` shares this bucket with the status-less risks.
pub const UNASSIGNED_STATUS: &str = "unassigned";
