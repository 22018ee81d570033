use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A comment left on a risk by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub risk_id: i64,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub comment_text: String,
    pub is_internal: bool,
    pub created_at: Option<DateTime<Utc>>,
}
