//! Route table tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use pretty_assertions::assert_eq;
use risk_api::AppState;
use risk_api::routes::create_router;
use risk_db::RiskDb;
use risk_db::service::{ReportSettings, RiskService};
use serde_json::Value;
use tower::ServiceExt;

const SEED: &str = "
    INSERT INTO roles (id, name, view_scope) VALUES (1, 'Admin', 'all'), (2, 'Viewer', 'country');
    INSERT INTO countries (id, code, name) VALUES (2, 'BR', 'Brazil'), (5, 'PT', 'Portugal');
    INSERT INTO users (id, full_name, email, role_id, country_id, is_active) VALUES
        (1, 'Ana Admin', 'ana@example.com', 1, NULL, 1),
        (2, 'Bruno Silva', 'bruno@example.com', 2, 2, 1),
        (3, 'Dario Lima', 'dario@example.com', 2, 2, 0);
    INSERT INTO risk_statuses (id, name) VALUES (1, 'Open'), (4, 'Closed');
    INSERT INTO risks (id, risk_code, title, country_id, status_id, residual_likelihood, residual_impact, residual_score, residual_classification) VALUES
        (1, 'BR-001', 'R1', 2, 1, 3, 4, 12, 'Significant'),
        (2, 'BR-002', 'R2', 2, 1, 3, 4, 12, 'Significant'),
        (3, 'PT-001', 'R3', 5, 4, 1, 1, 1, 'Low');
    INSERT INTO controls (id, risk_id, title) VALUES (1, 1, 'C1');
    INSERT INTO action_plans (id, risk_id, title, due_date, status) VALUES
        (1, 1, 'Hedge', '2020-01-01', 'Open'),
        (2, 3, 'Archive', NULL, 'Completed');
    INSERT INTO comments (id, risk_id, user_id, comment_text, is_internal) VALUES
        (1, 1, 2, 'public', 0),
        (2, 1, 1, 'private', 1);
";

async fn app() -> Router {
    let db = RiskDb::open_local(":memory:", Duration::from_secs(5))
        .await
        .unwrap();
    db.conn().execute_batch(SEED).await.unwrap();
    let service = RiskService::from_db(db, ReportSettings::default());
    create_router(Arc::new(AppState::new(service)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn banner_and_health() {
    let (status, body) = get(app().await, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "online");
    assert_eq!(body["name"], "riskmgr");

    let (status, body) = get(app().await, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn users_default_to_active() {
    let (status, body) = get(app().await, "/api/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = get(app().await, "/api/users?is_active=all").await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = get(app().await, "/api/users?is_active=false").await;
    assert_eq!(body[0]["full_name"], "Dario Lima");
}

#[tokio::test]
async fn user_count_is_not_an_id() {
    let (status, body) = get(app().await, "/api/users/count").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["by_role"][1]["name"], "Viewer");
    assert_eq!(body["by_role"][1]["count"], 2);
}

#[tokio::test]
async fn user_lookup() {
    let (status, body) = get(app().await, "/api/users/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role_name"], "Viewer");
    assert_eq!(body["country_code"], "BR");

    let (status, body) = get(app().await, "/api/users/42").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

#[tokio::test]
async fn reference_lists() {
    let (status, body) = get(app().await, "/api/roles").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = get(app().await, "/api/countries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[1]["code"], "PT");
}

#[tokio::test]
async fn risk_listing_with_filters() {
    let (status, body) = get(app().await, "/api/risks?country_id=2").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, [1, 2]);

    let (_, body) = get(app().await, "/api/risks?classification=low").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["risk_code"], "PT-001");
}

#[tokio::test]
async fn bad_filters_are_400() {
    for uri in [
        "/api/risks?country_id=abc",
        "/api/risks?status_id=0",
        "/api/risks?classification=huge",
        "/api/users?role_id=-1",
        "/api/users?is_active=maybe",
        "/api/risks/abc",
        "/api/risks/0",
        "/api/users/-3",
    ] {
        let (status, body) = get(app().await, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["type"], "/problems/invalid-filter", "{uri}");
    }
}

#[tokio::test]
async fn risk_detail_and_missing_risk() {
    let (status, body) = get(app().await, "/api/risks/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);
    assert_eq!(body["controls"].as_array().unwrap().len(), 1);
    assert_eq!(body["action_plans"].as_array().unwrap().len(), 1);
    assert_eq!(body["comments"].as_array().unwrap().len(), 1);
    assert_eq!(body["comments"][0]["comment_text"], "public");

    let (status, body) = get(app().await, "/api/risks/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Entity not found: risk 999");
}

#[tokio::test]
async fn summaries() {
    let (status, body) = get(app().await, "/api/risks/summary/by-country").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["country_id"], 2);
    assert_eq!(body[0]["total_risks"], 2);
    assert_eq!(body[1]["country_id"], 5);
    assert_eq!(body[1]["total_risks"], 1);

    let (status, body) = get(app().await, "/api/risks/summary/heatmap").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cells"].as_array().unwrap().len(), 25);
    assert_eq!(body["total_risks"], 3);
    assert_eq!(body["basis"], "residual");

    let (status, body) = get(app().await, "/api/dashboard/summary").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_risks"], 3);
    assert_eq!(body["open_action_plans"], 1);
    assert_eq!(body["overdue_action_plans"], 1);
    assert_eq!(body["total_active_users"], 2);
}

#[tokio::test]
async fn action_plans_by_status() {
    let (status, body) = get(app().await, "/api/action-plans?status=Completed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["risk_code"], "PT-001");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (status, _) = get(app().await, "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
