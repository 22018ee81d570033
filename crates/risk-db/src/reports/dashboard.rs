//! Dashboard summary: headline counts across risks, action plans and users.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use risk_core::enums::UNASSIGNED_STATUS;
use risk_core::responses::DashboardSummary;

use crate::error::DatabaseError;
use crate::helpers::round1;
use crate::repos::risk::RiskScope;
use crate::service::RiskService;

/// Raw results of the independent dashboard counting calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardCounts {
    pub total_risks: u64,
    pub risks_by_status: Vec<(Option<String>, u64)>,
    pub risks_by_classification: Vec<(String, u64)>,
    pub average_residual_score: Option<f64>,
    pub total_action_plans: u64,
    pub open_action_plans: u64,
    pub overdue_action_plans: u64,
    pub total_users: u64,
    pub total_active_users: u64,
}

/// Shape raw counts into the dashboard view.
///
/// Risks without a status are bucketed under `"unassigned"`, together with
/// any status of that name. If the status
/// breakdown disagrees with the risk total (the store changed between the
/// two counts) the breakdown wins, so the total always equals its sum.
#[must_use]
pub fn assemble(counts: DashboardCounts) -> DashboardSummary {
    let mut risks_by_status = BTreeMap::new();
    for (status, count) in counts.risks_by_status {
        let key = status.unwrap_or_else(|| UNASSIGNED_STATUS.to_string());
        *risks_by_status.entry(key).or_insert(0) += count;
    }

    let status_total: u64 = risks_by_status.values().sum();
    if status_total != counts.total_risks {
        tracing::warn!(
            total_risks = counts.total_risks,
            status_total,
            "risk total changed between dashboard counts"
        );
    }

    DashboardSummary {
        total_risks: status_total,
        risks_by_status,
        risks_by_classification: counts.risks_by_classification.into_iter().collect(),
        average_residual_score: counts.average_residual_score.map(round1),
        total_action_plans: counts.total_action_plans,
        open_action_plans: counts.open_action_plans,
        overdue_action_plans: counts.overdue_action_plans,
        total_users: counts.total_users,
        total_active_users: counts.total_active_users,
    }
}

impl RiskService {
    /// Dashboard summary with overdue plans judged against today's UTC date.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any counting query fails or times out.
    pub async fn summarize_dashboard(&self) -> Result<DashboardSummary, DatabaseError> {
        self.summarize_dashboard_on(Utc::now().date_naive()).await
    }

    /// Dashboard summary with overdue plans judged against `today`.
    ///
    /// Risk counts use the reporting scope; action plans and users are
    /// counted in full.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any counting query fails or times out.
    pub async fn summarize_dashboard_on(
        &self,
        today: NaiveDate,
    ) -> Result<DashboardSummary, DatabaseError> {
        let scope = RiskScope::Reporting;
        let counts = DashboardCounts {
            total_risks: self.count_risks(scope).await?,
            risks_by_status: self.count_risks_by_status(scope).await?,
            risks_by_classification: self.count_risks_by_classification(scope).await?,
            average_residual_score: self.average_residual_score(scope).await?,
            total_action_plans: self.count_action_plans().await?,
            open_action_plans: self.count_open_action_plans().await?,
            overdue_action_plans: self.count_overdue_action_plans(today).await?,
            total_users: self.count_users().await?,
            total_active_users: self.count_active_users().await?,
        };
        tracing::debug!(%today, total_risks = counts.total_risks, "counted dashboard");
        Ok(assemble(counts))
    }
}
