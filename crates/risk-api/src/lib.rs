//! # risk-api
//!
//! HTTP surface of the risk register: an explicit route table over
//! `RiskService`, query-string parsing into typed filters, and error to
//! status mapping. The `riskmgr` binary serves this router and also prints
//! one-shot reports.

pub mod error;
pub mod handlers;
pub mod params;
pub mod routes;

use risk_db::service::RiskService;

/// Shared state handed to every handler.
pub struct AppState {
    pub service: RiskService,
}

impl AppState {
    #[must_use]
    pub const fn new(service: RiskService) -> Self {
        Self { service }
    }
}
