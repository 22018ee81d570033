//! Control repository.

use risk_core::entities::Control;
use risk_core::filters::validate_id;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_score, get_opt_string};
use crate::service::RiskService;

fn row_to_control(row: &libsql::Row) -> Result<Control, DatabaseError> {
    Ok(Control {
        id: row.get(0)?,
        risk_id: row.get(1)?,
        title: row.get(2)?,
        description: get_opt_string(row, 3)?,
        control_type: row.get(4)?,
        effectiveness_score: get_opt_score(row, 5)?,
    })
}

impl RiskService {
    /// List the controls attached to a risk, in id order.
    ///
    /// An unknown risk yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` (invalid filter) for a non-positive id,
    /// or `DatabaseError` if the query fails.
    pub async fn list_controls_for_risk(&self, risk_id: i64) -> Result<Vec<Control>, DatabaseError> {
        let risk_id = validate_id("risk_id", risk_id)?;
        tracing::debug!(risk_id, "listing controls");
        self.db()
            .fetch_all(
                "SELECT id, risk_id, title, description, control_type, effectiveness_score \
                 FROM controls WHERE risk_id = ?1 ORDER BY id",
                [risk_id],
                row_to_control,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::{seed_example, seed_register, test_service};
    use pretty_assertions::assert_eq;
    use risk_core::entities::Control;

    #[tokio::test]
    async fn controls_belong_to_requested_risk() {
        let svc = test_service().await;
        seed_register(&svc).await;

        let controls = svc.list_controls_for_risk(1).await.unwrap();
        assert_eq!(
            controls,
            vec![Control {
                id: 1,
                risk_id: 1,
                title: "Hedging policy".into(),
                description: Some("Monthly forward contracts".into()),
                control_type: "preventive".into(),
                effectiveness_score: Some(4),
            }]
        );

        let other = svc.list_controls_for_risk(3).await.unwrap();
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].control_type, "detective");
        assert!(other[0].effectiveness_score.is_none());
    }

    #[tokio::test]
    async fn risk_without_controls_is_empty() {
        let svc = test_service().await;
        seed_example(&svc).await;
        assert!(svc.list_controls_for_risk(2).await.unwrap().is_empty());
        assert!(svc.list_controls_for_risk(999).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_positive_risk_id_is_invalid() {
        let svc = test_service().await;
        assert!(svc.list_controls_for_risk(0).await.unwrap_err().is_invalid_filter());
    }
}
