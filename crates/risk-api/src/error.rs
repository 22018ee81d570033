//! Error type for the HTTP layer and its mapping to status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use risk_core::errors::CoreError;
use risk_db::error::DatabaseError;
use serde::Serialize;

/// Failure of a request, from filter parsing or from the service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Rejected while parsing the request.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Raised by a repository or report operation.
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// RFC 7807 Problem Details response body.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub problem_type: String,
    pub title: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Core(CoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Core(CoreError::InvalidFilter { .. }) => StatusCode::BAD_REQUEST,
            Self::Core(CoreError::Other(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Database(e) if e.is_invalid_filter() => StatusCode::BAD_REQUEST,
            Self::Database(e) if e.is_storage_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn problem_type(status: StatusCode) -> &'static str {
        match status {
            StatusCode::NOT_FOUND => "/problems/not-found",
            StatusCode::BAD_REQUEST => "/problems/invalid-filter",
            StatusCode::SERVICE_UNAVAILABLE => "/problems/storage-unavailable",
            _ => "/problems/internal",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
            // Storage internals stay in the log.
            match status {
                StatusCode::SERVICE_UNAVAILABLE => "The risk store is unavailable".to_string(),
                _ => "An internal error occurred".to_string(),
            }
        } else {
            self.to_string()
        };

        let problem = ProblemDetails {
            problem_type: Self::problem_type(status).to_string(),
            title: status.canonical_reason().unwrap_or("Error").to_string(),
            status: status.as_u16(),
            detail: Some(detail),
        };
        (status, Json(problem)).into_response()
    }
}
