//! Shared test utilities for risk-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use std::time::Duration;

    use crate::RiskDb;
    use crate::service::{ReportSettings, RiskService};

    /// Create an in-memory RiskService with default reporting settings.
    pub async fn test_service() -> RiskService {
        test_service_with(ReportSettings::default()).await
    }

    /// Create an in-memory RiskService with specific reporting settings.
    pub async fn test_service_with(settings: ReportSettings) -> RiskService {
        let db = RiskDb::open_local(":memory:", Duration::from_secs(5))
            .await
            .unwrap();
        RiskService::from_db(db, settings)
    }

    async fn exec(svc: &RiskService, sql: &str) {
        svc.db().conn().execute_batch(sql).await.unwrap();
    }

    /// Lookup tables, roles, countries and users.
    ///
    /// Countries: 1 AO (no risks), 2 BR, 5 PT.
    /// Statuses: 1 Open, 2 Monitoring, 4 Closed.
    /// Users: 1 admin, 2 and 3 risk managers, 4 inactive viewer.
    pub async fn seed_reference(svc: &RiskService) {
        exec(
            svc,
            "INSERT INTO roles (id, name, description, view_scope, can_edit_any_risk, can_delete_risks, has_admin_privileges) VALUES
                (1, 'Admin', 'Full access', 'all', 1, 1, 1),
                (2, 'Risk Manager', NULL, 'country', 1, 0, 0),
                (3, 'Viewer', NULL, 'country', 0, 0, 0);
             INSERT INTO countries (id, code, name) VALUES
                (1, 'AO', 'Angola'),
                (2, 'BR', 'Brazil'),
                (5, 'PT', 'Portugal');
             INSERT INTO users (id, full_name, email, role_id, country_id, is_admin, is_active, last_login, created_at) VALUES
                (1, 'Ana Admin', 'ana@example.com', 1, NULL, 1, 1, '2026-03-01 09:00:00', '2025-01-01 08:00:00'),
                (2, 'Bruno Silva', 'bruno@example.com', 2, 2, 0, 1, NULL, '2025-01-02 08:00:00'),
                (3, 'Carla Sousa', 'carla@example.com', 2, 5, 0, 1, NULL, '2025-01-03 08:00:00'),
                (4, 'Dario Lima', 'dario@example.com', 3, 2, 0, 0, NULL, '2025-01-04 08:00:00');
             INSERT INTO risk_statuses (id, name) VALUES (1, 'Open'), (2, 'Monitoring'), (4, 'Closed');
             INSERT INTO risk_registers (id, name) VALUES (1, 'Enterprise');
             INSERT INTO risk_functions (id, name) VALUES (1, 'Finance');
             INSERT INTO risk_categories (id, name) VALUES (1, 'Operational');
             INSERT INTO principal_risks (id, name) VALUES (1, 'Liquidity');
             INSERT INTO risk_trends (id, name) VALUES (1, 'Stable');
             INSERT INTO control_ratings (id, name) VALUES (1, 'Effective'), (2, 'Needs Improvement');",
        )
        .await;
    }

    /// Three risks and one control:
    /// R1 (country 2, residual 3/4), R2 (country 2, residual 3/4),
    /// R3 (country 5, residual 1/1). R1 has control C1.
    pub async fn seed_example(svc: &RiskService) {
        seed_reference(svc).await;
        exec(
            svc,
            "INSERT INTO risks (id, risk_code, title, description, country_id, risk_register_id, function_id, category_id,
                                principal_risk_id, owner_id, status_id, trend_id,
                                inherent_impact, inherent_likelihood, inherent_score, inherent_classification,
                                controls_rating_id, residual_impact, residual_likelihood, residual_score, residual_classification,
                                last_review_date, created_at) VALUES
                (1, 'BR-001', 'Currency exposure', 'FX swings on imports', 2, 1, 1, 1,
                 1, 2, 1, 1, 5, 5, 25, 'Significant', 1, 4, 3, 12, 'Significant', '2026-02-10', '2025-06-01 10:00:00'),
                (2, 'BR-002', 'Supplier concentration', NULL, 2, 1, NULL, NULL,
                 NULL, 2, 2, NULL, 4, 4, 16, 'Significant', NULL, 4, 3, 12, 'Significant', NULL, '2025-06-02 10:00:00'),
                (3, 'PT-001', 'Data retention', NULL, 5, NULL, NULL, NULL,
                 NULL, 3, 1, NULL, 3, 2, 6, 'Moderate', NULL, 1, 1, 1, 'Low', NULL, '2025-06-03 10:00:00');
             INSERT INTO controls (id, risk_id, title, description, control_type, rating_id, effectiveness_score, is_active) VALUES
                (1, 1, 'Hedging policy', 'Monthly forward contracts', 'preventive', 1, 4, 1);",
        )
        .await;
    }

    /// The example data plus closed, unscored, out-of-range and
    /// country-less risks, action plans and comments.
    ///
    /// R4 (country 5, Closed, residual 2/2), R5 (no country, no status, no
    /// scores), R6 (country 2, residual likelihood 6 outside 1..=5).
    pub async fn seed_register(svc: &RiskService) {
        seed_example(svc).await;
        exec(
            svc,
            "INSERT INTO risks (id, risk_code, title, country_id, owner_id, status_id,
                                inherent_impact, inherent_likelihood, inherent_score,
                                residual_impact, residual_likelihood, residual_score, residual_classification) VALUES
                (4, 'PT-002', 'Legacy licensing', 5, 3, 4, 3, 3, 9, 2, 2, 4, 'Moderate'),
                (5, NULL, 'Unassessed vendor', NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL, NULL),
                (6, 'BR-003', 'Scoring outlier', 2, 2, 1, 2, 2, 4, 2, 6, 12, 'Moderate');
             INSERT INTO controls (id, risk_id, title, control_type, effectiveness_score) VALUES
                (2, 3, 'Retention schedule', 'detective', NULL);
             INSERT INTO action_plans (id, risk_id, title, description, responsible_id, due_date, status, priority, completion_date) VALUES
                (1, 1, 'Extend hedging', NULL, 2, '2026-01-15', 'Open', 'High', NULL),
                (2, 1, 'Review FX limits', 'Quarterly review', 1, '2099-12-31', 'In Progress', 'Medium', NULL),
                (3, 3, 'Purge archives', NULL, 3, '2025-01-01', 'Completed', 'Low', '2025-01-02'),
                (4, 6, 'Recalibrate scoring', NULL, NULL, NULL, 'Open', 'Medium', NULL);
             INSERT INTO comments (id, risk_id, user_id, comment_text, is_internal, created_at) VALUES
                (1, 1, 2, 'Hedging renewed for Q1', 0, '2026-01-05 12:00:00'),
                (2, 1, 1, 'Board asked for weekly figures', 1, '2026-01-06 12:00:00'),
                (3, 3, 3, 'Archive audit scheduled', 0, '2026-02-01 12:00:00');",
        )
        .await;
    }
}
