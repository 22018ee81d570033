//! Request handlers: parse, call the service, serialize.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use risk_core::entities::{ActionPlan, Country, Risk, Role, User};
use risk_core::responses::{CountrySummary, DashboardSummary, HeatmapSummary, RiskDetail, UserCount};
use serde_json::{Value, json};

use crate::AppState;
use crate::error::ApiError;
use crate::params::{ActionPlanQuery, RiskQuery, UserQuery, parse_id};

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Service banner.
pub async fn root() -> Json<Value> {
    Json(json!({
        "status": "online",
        "name": "riskmgr",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Liveness probe. Does not touch the store.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Vec<User>> {
    let filter = query.into_filter()?;
    Ok(Json(state.service.list_users(&filter).await?))
}

pub async fn count_users(State(state): State<Arc<AppState>>) -> ApiResult<UserCount> {
    Ok(Json(state.service.count_users_by_role().await?))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> ApiResult<User> {
    let id = parse_id("user_id", &raw_id)?;
    Ok(Json(state.service.get_user(id).await?))
}

pub async fn list_roles(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Role>> {
    Ok(Json(state.service.list_roles().await?))
}

pub async fn list_countries(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Country>> {
    Ok(Json(state.service.list_countries().await?))
}

pub async fn list_risks(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RiskQuery>,
) -> ApiResult<Vec<Risk>> {
    let filter = query.into_filter()?;
    Ok(Json(state.service.list_risks(&filter).await?))
}

pub async fn get_risk_detail(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> ApiResult<RiskDetail> {
    let id = parse_id("risk_id", &raw_id)?;
    Ok(Json(state.service.get_risk_detail(id).await?))
}

pub async fn summary_by_country(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Vec<CountrySummary>> {
    Ok(Json(state.service.summarize_by_country().await?))
}

pub async fn summary_heatmap(State(state): State<Arc<AppState>>) -> ApiResult<HeatmapSummary> {
    Ok(Json(state.service.summarize_heatmap().await?))
}

pub async fn list_action_plans(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ActionPlanQuery>,
) -> ApiResult<Vec<ActionPlan>> {
    let filter = query.into_filter()?;
    Ok(Json(state.service.list_action_plans(&filter).await?))
}

pub async fn dashboard_summary(
    State(state): State<Arc<AppState>>,
) -> ApiResult<DashboardSummary> {
    Ok(Json(state.service.summarize_dashboard().await?))
}
