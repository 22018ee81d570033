use serde::{Deserialize, Serialize};

/// A role granting a view scope and a set of privileges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Role {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub view_scope: String,
    pub can_edit_any_risk: bool,
    pub can_delete_risks: bool,
    pub has_admin_privileges: bool,
}
