//! Role repository.

use risk_core::entities::Role;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string};
use crate::service::RiskService;

const SELECT_COLS: &str = "id, name, description, view_scope, can_edit_any_risk, can_delete_risks, has_admin_privileges";

fn row_to_role(row: &libsql::Row) -> Result<Role, DatabaseError> {
    Ok(Role {
        id: row.get(0)?,
        name: row.get(1)?,
        description: get_opt_string(row, 2)?,
        view_scope: row.get(3)?,
        can_edit_any_risk: get_bool(row, 4)?,
        can_delete_risks: get_bool(row, 5)?,
        has_admin_privileges: get_bool(row, 6)?,
    })
}

impl RiskService {
    /// List all roles.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn list_roles(&self) -> Result<Vec<Role>, DatabaseError> {
        tracing::debug!("listing roles");
        self.db()
            .fetch_all(
                &format!("SELECT {SELECT_COLS} FROM roles ORDER BY id"),
                (),
                row_to_role,
            )
            .await
    }
}
