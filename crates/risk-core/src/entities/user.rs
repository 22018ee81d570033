use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user with role and country resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub role_id: i64,
    pub role_name: Option<String>,
    pub view_scope: Option<String>,
    pub country_id: Option<i64>,
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}
