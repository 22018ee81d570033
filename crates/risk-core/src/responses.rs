//! Composite and summary views returned by the risk aggregator.
//!
//! These are the JSON bodies of the detail and summary endpoints. Field
//! presence is fixed here; nothing is assembled ad hoc per request.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::entities::{ActionPlan, Comment, Control, Risk};
use crate::enums::HeatmapBasis;
use crate::scale::Scale;

/// A risk together with everything attached to it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RiskDetail {
    #[serde(flatten)]
    pub risk: Risk,
    pub principal_risk: Option<String>,
    pub controls_rating: Option<String>,
    pub controls: Vec<Control>,
    pub action_plans: Vec<ActionPlan>,
    pub comments: Vec<Comment>,
}

/// Number of users holding one role.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RoleCount {
    pub name: String,
    pub count: u64,
}

/// Response of `/api/users/count`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UserCount {
    pub total: u64,
    pub by_role: Vec<RoleCount>,
}

/// Risk counts for one country. Only countries with at least one risk appear.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CountrySummary {
    pub country_id: i64,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub total_risks: u64,
    pub by_status: BTreeMap<String, u64>,
    pub significant: u64,
    pub moderate: u64,
    pub low: u64,
    pub avg_residual_score: Option<f64>,
}

/// One cell of the likelihood × impact matrix.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct HeatmapCell {
    pub likelihood: i64,
    pub impact: i64,
    pub count: u64,
}

/// Dense likelihood × impact matrix.
///
/// `cells` holds exactly `scale.size()²` entries ordered by likelihood, then
/// impact. Risks that could not be placed are counted in `excluded`, so
/// `cells` sum plus `excluded` equals `total_risks`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HeatmapSummary {
    pub basis: HeatmapBasis,
    pub scale: Scale,
    pub cells: Vec<HeatmapCell>,
    pub excluded: u64,
    pub total_risks: u64,
}

impl HeatmapSummary {
    /// Count at `(likelihood, impact)`, or `None` outside the scale.
    #[must_use]
    pub fn cell(&self, likelihood: i64, impact: i64) -> Option<u64> {
        if !self.scale.contains(likelihood) || !self.scale.contains(impact) {
            return None;
        }
        let row = usize::try_from(likelihood - self.scale.min()).ok()?;
        let col = usize::try_from(impact - self.scale.min()).ok()?;
        self.cells
            .get(row * self.scale.size() + col)
            .map(|cell| cell.count)
    }

    /// Sum of all cell counts.
    #[must_use]
    pub fn placed(&self) -> u64 {
        self.cells.iter().map(|cell| cell.count).sum()
    }
}

/// Response of `/api/dashboard/summary`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub total_risks: u64,
    pub risks_by_status: BTreeMap<String, u64>,
    pub risks_by_classification: BTreeMap<String, u64>,
    pub average_residual_score: Option<f64>,
    pub total_action_plans: u64,
    pub open_action_plans: u64,
    pub overdue_action_plans: u64,
    pub total_users: u64,
    pub total_active_users: u64,
}
