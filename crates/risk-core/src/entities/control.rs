use serde::{Deserialize, Serialize};

/// A mitigation measure attached to a risk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Control {
    pub id: i64,
    pub risk_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub control_type: String,
    pub effectiveness_score: Option<i64>,
}
