//! Action plan repository.
//!
//! Action plans carry their risk code/title and the responsible user's name.
//! "Open" means a status in [`OPEN_ACTION_STATUSES`]; "overdue" is an open
//! plan whose due date is before the given day.

use chrono::NaiveDate;
use risk_core::entities::ActionPlan;
use risk_core::enums::OPEN_ACTION_STATUSES;
use risk_core::filters::{ActionPlanFilter, validate_id};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_date, get_opt_string};
use crate::repos::{push_condition, where_clause};
use crate::service::RiskService;

const SELECT_COLS: &str = "a.id, a.risk_id, r.risk_code, r.title, a.title, a.description, \
     a.responsible_id, u.full_name, a.due_date, a.status, a.priority, a.completion_date";

const FROM_JOINED: &str = "FROM action_plans a \
     LEFT JOIN risks r ON r.id = a.risk_id \
     LEFT JOIN users u ON u.id = a.responsible_id";

const OPEN_CLAUSE: &str = "a.status IN (?1, ?2)";

fn row_to_action_plan(row: &libsql::Row) -> Result<ActionPlan, DatabaseError> {
    Ok(ActionPlan {
        id: row.get(0)?,
        risk_id: row.get(1)?,
        risk_code: get_opt_string(row, 2)?,
        risk_title: get_opt_string(row, 3)?,
        title: row.get(4)?,
        description: get_opt_string(row, 5)?,
        responsible_id: row.get::<Option<i64>>(6)?,
        responsible_name: get_opt_string(row, 7)?,
        due_date: get_opt_date(row, 8)?,
        status: row.get(9)?,
        priority: row.get(10)?,
        completion_date: get_opt_date(row, 11)?,
    })
}

impl RiskService {
    /// List action plans matching `filter`, in id order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` (invalid filter) for a blank status, or
    /// `DatabaseError` if the query fails.
    pub async fn list_action_plans(
        &self,
        filter: &ActionPlanFilter,
    ) -> Result<Vec<ActionPlan>, DatabaseError> {
        filter.validate()?;

        let mut where_parts = Vec::new();
        let mut params = Vec::new();
        if let Some(status) = &filter.status {
            push_condition(
                &mut where_parts,
                &mut params,
                "a.status",
                libsql::Value::Text(status.clone()),
            );
        }

        let sql = format!(
            "SELECT {SELECT_COLS} {FROM_JOINED}{} ORDER BY a.id",
            where_clause(&where_parts)
        );
        tracing::debug!(?filter, "listing action plans");
        self.db()
            .fetch_all(&sql, libsql::params_from_iter(params), row_to_action_plan)
            .await
    }

    /// List the action plans attached to a risk, in id order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` (invalid filter) for a non-positive id,
    /// or `DatabaseError` if the query fails.
    pub async fn list_actions_for_risk(&self, risk_id: i64) -> Result<Vec<ActionPlan>, DatabaseError> {
        let risk_id = validate_id("risk_id", risk_id)?;
        tracing::debug!(risk_id, "listing action plans for risk");
        self.db()
            .fetch_all(
                &format!("SELECT {SELECT_COLS} {FROM_JOINED} WHERE a.risk_id = ?1 ORDER BY a.id"),
                [risk_id],
                row_to_action_plan,
            )
            .await
    }

    /// Count all action plans.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn count_action_plans(&self) -> Result<u64, DatabaseError> {
        self.db()
            .fetch_count("SELECT COUNT(*) FROM action_plans", ())
            .await
    }

    /// Count action plans that are still open or in progress.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn count_open_action_plans(&self) -> Result<u64, DatabaseError> {
        let [open, in_progress] = OPEN_ACTION_STATUSES;
        self.db()
            .fetch_count(
                &format!("SELECT COUNT(*) FROM action_plans a WHERE {OPEN_CLAUSE}"),
                [open, in_progress],
            )
            .await
    }

    /// Count open action plans due strictly before `today`.
    ///
    /// Plans without a due date are never overdue.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn count_overdue_action_plans(&self, today: NaiveDate) -> Result<u64, DatabaseError> {
        let [open, in_progress] = OPEN_ACTION_STATUSES;
        let today = today.format("%Y-%m-%d").to_string();
        self.db()
            .fetch_count(
                &format!(
                    "SELECT COUNT(*) FROM action_plans a WHERE {OPEN_CLAUSE} \
                     AND a.due_date IS NOT NULL AND date(a.due_date) < date(?3)"
                ),
                libsql::params![open, in_progress, today],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::{seed_register, test_service};
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use risk_core::filters::ActionPlanFilter;

    #[tokio::test]
    async fn list_action_plans_resolves_risk_and_owner() {
        let svc = test_service().await;
        seed_register(&svc).await;

        let plans = svc.list_action_plans(&ActionPlanFilter::default()).await.unwrap();
        let ids: Vec<i64> = plans.iter().map(|a| a.id).collect();
        assert_eq!(ids, [1, 2, 3, 4]);

        let first = &plans[0];
        assert_eq!(first.risk_code.as_deref(), Some("BR-001"));
        assert_eq!(first.risk_title.as_deref(), Some("Currency exposure"));
        assert_eq!(first.responsible_name.as_deref(), Some("Bruno Silva"));
        assert_eq!(first.due_date, NaiveDate::from_ymd_opt(2026, 1, 15));
        assert_eq!(first.priority, "High");

        let completed = &plans[2];
        assert_eq!(completed.completion_date, NaiveDate::from_ymd_opt(2025, 1, 2));

        let unowned = &plans[3];
        assert!(unowned.responsible_id.is_none());
        assert!(unowned.responsible_name.is_none());
        assert!(unowned.due_date.is_none());
    }

    #[tokio::test]
    async fn list_action_plans_by_status() {
        let svc = test_service().await;
        seed_register(&svc).await;

        let open = svc
            .list_action_plans(&ActionPlanFilter {
                status: Some("Open".into()),
            })
            .await
            .unwrap();
        let ids: Vec<i64> = open.iter().map(|a| a.id).collect();
        assert_eq!(ids, [1, 4]);
    }

    #[tokio::test]
    async fn blank_status_filter_is_invalid() {
        let svc = test_service().await;
        let err = svc
            .list_action_plans(&ActionPlanFilter {
                status: Some("  ".into()),
            })
            .await
            .unwrap_err();
        assert!(err.is_invalid_filter());
    }

    #[tokio::test]
    async fn actions_for_risk() {
        let svc = test_service().await;
        seed_register(&svc).await;

        let plans = svc.list_actions_for_risk(1).await.unwrap();
        assert_eq!(plans.len(), 2);
        assert!(plans.iter().all(|a| a.risk_id == 1));
        assert!(svc.list_actions_for_risk(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn action_plan_counts() {
        let svc = test_service().await;
        seed_register(&svc).await;

        assert_eq!(svc.count_action_plans().await.unwrap(), 4);
        assert_eq!(svc.count_open_action_plans().await.unwrap(), 3);

        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(svc.count_overdue_action_plans(today).await.unwrap(), 1);

        let before_everything = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(
            svc.count_overdue_action_plans(before_everything).await.unwrap(),
            0
        );

        // Due today is not overdue yet.
        let due_day = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        assert_eq!(svc.count_overdue_action_plans(due_day).await.unwrap(), 0);
    }
}
