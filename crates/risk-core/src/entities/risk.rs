use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A tracked risk with its inherent and residual assessments.
///
/// Scores are nullable: rows imported from spreadsheets sometimes lack an
/// assessment. The heatmap reports those separately instead of guessing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Risk {
    pub id: i64,
    pub risk_code: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub country_id: Option<i64>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    pub risk_register: Option<String>,
    pub function_area: Option<String>,
    pub category: Option<String>,
    pub owner_id: Option<i64>,
    pub owner_name: Option<String>,
    pub status_id: Option<i64>,
    pub status: Option<String>,
    pub trend: Option<String>,
    pub inherent_impact: Option<i64>,
    pub inherent_likelihood: Option<i64>,
    pub inherent_score: Option<i64>,
    pub inherent_classification: Option<String>,
    pub residual_impact: Option<i64>,
    pub residual_likelihood: Option<i64>,
    pub residual_score: Option<i64>,
    pub residual_classification: Option<String>,
    pub last_review_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
}
