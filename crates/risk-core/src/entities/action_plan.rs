use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A remediation task tied to a risk and owned by a responsible user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionPlan {
    pub id: i64,
    pub risk_id: i64,
    pub risk_code: Option<String>,
    pub risk_title: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub responsible_id: Option<i64>,
    pub responsible_name: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: String,
    pub priority: String,
    pub completion_date: Option<NaiveDate>,
}
