//! Route table.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::handlers;

/// Build the application router. Every route is a read-only `GET`.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/api/users", get(handlers::list_users))
        .route("/api/users/count", get(handlers::count_users))
        .route("/api/users/:id", get(handlers::get_user))
        .route("/api/roles", get(handlers::list_roles))
        .route("/api/countries", get(handlers::list_countries))
        .route("/api/risks", get(handlers::list_risks))
        .route("/api/risks/summary/by-country", get(handlers::summary_by_country))
        .route("/api/risks/summary/heatmap", get(handlers::summary_heatmap))
        .route("/api/risks/:id", get(handlers::get_risk_detail))
        .route("/api/action-plans", get(handlers::list_action_plans))
        .route("/api/dashboard/summary", get(handlers::dashboard_summary))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve the router until the process is stopped.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(state: Arc<AppState>, addr: &str) -> anyhow::Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr, "risk reporting API listening");
    axum::serve(listener, app).await?;
    Ok(())
}
