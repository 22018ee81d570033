//! Comment repository.

use risk_core::entities::Comment;
use risk_core::filters::validate_id;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_datetime, get_opt_string};
use crate::service::RiskService;

fn row_to_comment(row: &libsql::Row) -> Result<Comment, DatabaseError> {
    Ok(Comment {
        id: row.get(0)?,
        risk_id: row.get(1)?,
        user_id: row.get::<Option<i64>>(2)?,
        user_name: get_opt_string(row, 3)?,
        comment_text: row.get(4)?,
        is_internal: get_bool(row, 5)?,
        created_at: get_opt_datetime(row, 6)?,
    })
}

impl RiskService {
    /// List comments on a risk, in id order, with author names resolved.
    ///
    /// Internal comments are included only when `include_internal` is set.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` (invalid filter) for a non-positive id,
    /// or `DatabaseError` if the query fails.
    pub async fn list_comments_for_risk(
        &self,
        risk_id: i64,
        include_internal: bool,
    ) -> Result<Vec<Comment>, DatabaseError> {
        let risk_id = validate_id("risk_id", risk_id)?;
        let visibility = if include_internal {
            ""
        } else {
            " AND m.is_internal = 0"
        };
        let sql = format!(
            "SELECT m.id, m.risk_id, m.user_id, u.full_name, m.comment_text, m.is_internal, m.created_at \
             FROM comments m LEFT JOIN users u ON u.id = m.user_id \
             WHERE m.risk_id = ?1{visibility} ORDER BY m.id"
        );
        tracing::debug!(risk_id, include_internal, "listing comments");
        self.db().fetch_all(&sql, [risk_id], row_to_comment).await
    }
}
