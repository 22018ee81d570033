//! Composite risk view: one risk with its controls, action plans and
//! public comments.

use risk_core::entities::{ActionPlan, Comment, Control, Risk};
use risk_core::responses::RiskDetail;

use crate::error::DatabaseError;
use crate::repos::risk::RiskExtras;
use crate::service::RiskService;

/// Assemble a detail view, keeping only sub-records that belong to `risk`.
#[must_use]
pub fn compose(
    risk: Risk,
    extras: RiskExtras,
    controls: Vec<Control>,
    action_plans: Vec<ActionPlan>,
    comments: Vec<Comment>,
) -> RiskDetail {
    let id = risk.id;
    RiskDetail {
        risk,
        principal_risk: extras.principal_risk,
        controls_rating: extras.controls_rating,
        controls: controls.into_iter().filter(|c| c.risk_id == id).collect(),
        action_plans: action_plans.into_iter().filter(|a| a.risk_id == id).collect(),
        comments: comments
            .into_iter()
            .filter(|m| m.risk_id == id && !m.is_internal)
            .collect(),
    }
}

impl RiskService {
    /// Fetch a risk with its controls, action plans and non-internal comments.
    ///
    /// Nothing else is fetched when the risk does not exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` with `NotFound` for an unknown risk or
    /// `InvalidFilter` for a non-positive id, or `DatabaseError` if a query
    /// fails.
    pub async fn get_risk_detail(&self, risk_id: i64) -> Result<RiskDetail, DatabaseError> {
        let (risk, extras) = self.get_risk_with_extras(risk_id).await?;
        let controls = self.list_controls_for_risk(risk.id).await?;
        let action_plans = self.list_actions_for_risk(risk.id).await?;
        let comments = self.list_comments_for_risk(risk.id, false).await?;
        tracing::debug!(
            risk_id,
            controls = controls.len(),
            action_plans = action_plans.len(),
            comments = comments.len(),
            "assembled risk detail"
        );
        Ok(compose(risk, extras, controls, action_plans, comments))
    }
}
