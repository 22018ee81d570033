//! User repository.
//!
//! Users are returned with their role and country resolved by join.

use risk_core::entities::User;
use risk_core::enums::EntityType;
use risk_core::errors::CoreError;
use risk_core::filters::{UserFilter, validate_id};
use risk_core::responses::{RoleCount, UserCount};

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_count, get_opt_datetime, get_opt_string};
use crate::repos::{push_condition, where_clause};
use crate::service::RiskService;

const SELECT_COLS: &str = "u.id, u.full_name, u.email, u.role_id, ro.name, ro.view_scope, \
     u.country_id, c.name, c.code, u.is_admin, u.is_active, u.last_login, u.created_at";

const FROM_JOINED: &str = "FROM users u \
     LEFT JOIN roles ro ON ro.id = u.role_id \
     LEFT JOIN countries c ON c.id = u.country_id";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        role_id: row.get(3)?,
        role_name: get_opt_string(row, 4)?,
        view_scope: get_opt_string(row, 5)?,
        country_id: row.get::<Option<i64>>(6)?,
        country_name: get_opt_string(row, 7)?,
        country_code: get_opt_string(row, 8)?,
        is_admin: get_bool(row, 9)?,
        is_active: get_bool(row, 10)?,
        last_login: get_opt_datetime(row, 11)?,
        created_at: get_opt_datetime(row, 12)?,
    })
}

fn row_to_role_count(row: &libsql::Row) -> Result<RoleCount, DatabaseError> {
    Ok(RoleCount {
        name: row.get(0)?,
        count: get_count(row, 1)?,
    })
}

impl RiskService {
    /// List users matching `filter`, in id order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` (invalid filter) before querying if a
    /// filter id is not positive, or `DatabaseError` if the query fails.
    pub async fn list_users(&self, filter: &UserFilter) -> Result<Vec<User>, DatabaseError> {
        filter.validate()?;

        let mut where_parts = Vec::new();
        let mut params = Vec::new();
        if let Some(role_id) = filter.role_id {
            push_condition(&mut where_parts, &mut params, "u.role_id", libsql::Value::Integer(role_id));
        }
        if let Some(country_id) = filter.country_id {
            push_condition(&mut where_parts, &mut params, "u.country_id", libsql::Value::Integer(country_id));
        }
        if let Some(is_active) = filter.is_active {
            push_condition(
                &mut where_parts,
                &mut params,
                "u.is_active",
                libsql::Value::Integer(i64::from(is_active)),
            );
        }

        let sql = format!(
            "SELECT {SELECT_COLS} {FROM_JOINED}{} ORDER BY u.id",
            where_clause(&where_parts)
        );
        tracing::debug!(?filter, "listing users");
        self.db()
            .fetch_all(&sql, libsql::params_from_iter(params), row_to_user)
            .await
    }

    /// Get a single user by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` with `InvalidFilter` for a non-positive
    /// id or `NotFound` if no such user exists.
    pub async fn get_user(&self, id: i64) -> Result<User, DatabaseError> {
        let id = validate_id("user_id", id)?;
        tracing::debug!(id, "fetching user");
        self.db()
            .fetch_optional(
                &format!("SELECT {SELECT_COLS} {FROM_JOINED} WHERE u.id = ?1"),
                [id],
                row_to_user,
            )
            .await?
            .ok_or_else(|| CoreError::not_found(EntityType::User.as_str(), id).into())
    }

    /// Count all users.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn count_users(&self) -> Result<u64, DatabaseError> {
        self.db().fetch_count("SELECT COUNT(*) FROM users", ()).await
    }

    /// Count users flagged active.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn count_active_users(&self) -> Result<u64, DatabaseError> {
        self.db()
            .fetch_count("SELECT COUNT(*) FROM users WHERE is_active = 1", ())
            .await
    }

    /// Total user count plus a per-role breakdown in role id order.
    ///
    /// Roles without users are left out of the breakdown.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails or times out.
    pub async fn count_users_by_role(&self) -> Result<UserCount, DatabaseError> {
        let total = self.count_users().await?;
        let by_role = self
            .db()
            .fetch_all(
                "SELECT ro.name, COUNT(u.id) FROM users u \
                 JOIN roles ro ON ro.id = u.role_id \
                 GROUP BY ro.id, ro.name ORDER BY ro.id",
                (),
                row_to_role_count,
            )
            .await?;
        tracing::debug!(total, roles = by_role.len(), "counted users by role");
        Ok(UserCount { total, by_role })
    }
}
