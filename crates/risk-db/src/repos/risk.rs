//! Risk repository.
//!
//! Risks come back with their lookup names (country, register, function,
//! category, owner, status, trend) resolved by join. The summaries read
//! the narrower [`RiskRating`] projection, and the counting primitives feed
//! the dashboard. Both take a [`RiskScope`].

use risk_core::entities::Risk;
use risk_core::enums::EntityType;
use risk_core::errors::CoreError;
use risk_core::filters::{RiskFilter, validate_id};

use crate::error::DatabaseError;
use crate::helpers::{get_count, get_opt_date, get_opt_datetime, get_opt_score, get_opt_string};
use crate::repos::{push_condition, where_clause};
use crate::service::RiskService;

/// Which risks a counting primitive looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskScope {
    /// Every risk in the store.
    All,
    /// Risks outside the configured closed status.
    Reporting,
}

const SELECT_COLS: &str = "r.id, r.risk_code, r.title, r.description, \
     r.country_id, c.name, c.code, rr.name, rf.name, rc.name, \
     r.owner_id, o.full_name, r.status_id, s.name, t.name, \
     r.inherent_impact, r.inherent_likelihood, r.inherent_score, r.inherent_classification, \
     r.residual_impact, r.residual_likelihood, r.residual_score, r.residual_classification, \
     r.last_review_date, r.created_at, pr.name, cr.name";

const FROM_JOINED: &str = "FROM risks r \
     LEFT JOIN countries c ON c.id = r.country_id \
     LEFT JOIN risk_registers rr ON rr.id = r.risk_register_id \
     LEFT JOIN risk_functions rf ON rf.id = r.function_id \
     LEFT JOIN risk_categories rc ON rc.id = r.category_id \
     LEFT JOIN users o ON o.id = r.owner_id \
     LEFT JOIN risk_statuses s ON s.id = r.status_id \
     LEFT JOIN risk_trends t ON t.id = r.trend_id \
     LEFT JOIN principal_risks pr ON pr.id = r.principal_risk_id \
     LEFT JOIN control_ratings cr ON cr.id = r.controls_rating_id";

const RATING_COLS: &str = "r.id, r.country_id, c.code, c.name, s.name, \
     r.inherent_impact, r.inherent_likelihood, \
     r.residual_impact, r.residual_likelihood, r.residual_score, r.residual_classification";

const FROM_RATING: &str = "FROM risks r \
     LEFT JOIN countries c ON c.id = r.country_id \
     LEFT JOIN risk_statuses s ON s.id = r.status_id";

/// Where a risk sits and how it is scored; the columns the summaries read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskRating {
    pub id: i64,
    pub country_id: Option<i64>,
    pub country_code: Option<String>,
    pub country_name: Option<String>,
    pub status: Option<String>,
    pub inherent_impact: Option<i64>,
    pub inherent_likelihood: Option<i64>,
    pub residual_impact: Option<i64>,
    pub residual_likelihood: Option<i64>,
    pub residual_score: Option<i64>,
    pub residual_classification: Option<String>,
}

/// Lookup names shown only on the risk detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RiskExtras {
    pub principal_risk: Option<String>,
    pub controls_rating: Option<String>,
}

fn row_to_risk(row: &libsql::Row) -> Result<Risk, DatabaseError> {
    Ok(Risk {
        id: row.get(0)?,
        risk_code: get_opt_string(row, 1)?,
        title: row.get(2)?,
        description: get_opt_string(row, 3)?,
        country_id: row.get::<Option<i64>>(4)?,
        country_name: get_opt_string(row, 5)?,
        country_code: get_opt_string(row, 6)?,
        risk_register: get_opt_string(row, 7)?,
        function_area: get_opt_string(row, 8)?,
        category: get_opt_string(row, 9)?,
        owner_id: row.get::<Option<i64>>(10)?,
        owner_name: get_opt_string(row, 11)?,
        status_id: row.get::<Option<i64>>(12)?,
        status: get_opt_string(row, 13)?,
        trend: get_opt_string(row, 14)?,
        inherent_impact: get_opt_score(row, 15)?,
        inherent_likelihood: get_opt_score(row, 16)?,
        inherent_score: get_opt_score(row, 17)?,
        inherent_classification: get_opt_string(row, 18)?,
        residual_impact: get_opt_score(row, 19)?,
        residual_likelihood: get_opt_score(row, 20)?,
        residual_score: get_opt_score(row, 21)?,
        residual_classification: get_opt_string(row, 22)?,
        last_review_date: get_opt_date(row, 23)?,
        created_at: get_opt_datetime(row, 24)?,
    })
}

fn row_to_rating(row: &libsql::Row) -> Result<RiskRating, DatabaseError> {
    Ok(RiskRating {
        id: row.get(0)?,
        country_id: row.get::<Option<i64>>(1)?,
        country_code: get_opt_string(row, 2)?,
        country_name: get_opt_string(row, 3)?,
        status: get_opt_string(row, 4)?,
        inherent_impact: get_opt_score(row, 5)?,
        inherent_likelihood: get_opt_score(row, 6)?,
        residual_impact: get_opt_score(row, 7)?,
        residual_likelihood: get_opt_score(row, 8)?,
        residual_score: get_opt_score(row, 9)?,
        residual_classification: get_opt_string(row, 10)?,
    })
}

fn row_to_risk_with_extras(row: &libsql::Row) -> Result<(Risk, RiskExtras), DatabaseError> {
    let risk = row_to_risk(row)?;
    let extras = RiskExtras {
        principal_risk: get_opt_string(row, 25)?,
        controls_rating: get_opt_string(row, 26)?,
    };
    Ok((risk, extras))
}

fn row_to_status_count(row: &libsql::Row) -> Result<(Option<String>, u64), DatabaseError> {
    Ok((get_opt_string(row, 0)?, get_count(row, 1)?))
}

fn row_to_classification_count(row: &libsql::Row) -> Result<(String, u64), DatabaseError> {
    Ok((row.get(0)?, get_count(row, 1)?))
}

impl RiskService {
    /// List risks matching `filter`, in id order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` (invalid filter) before querying if a
    /// filter id is not positive, or `DatabaseError` if the query fails.
    pub async fn list_risks(&self, filter: &RiskFilter) -> Result<Vec<Risk>, DatabaseError> {
        filter.validate()?;

        let mut where_parts = Vec::new();
        let mut params = Vec::new();
        if let Some(country_id) = filter.country_id {
            push_condition(&mut where_parts, &mut params, "r.country_id", libsql::Value::Integer(country_id));
        }
        if let Some(status_id) = filter.status_id {
            push_condition(&mut where_parts, &mut params, "r.status_id", libsql::Value::Integer(status_id));
        }
        if let Some(classification) = filter.classification {
            push_condition(
                &mut where_parts,
                &mut params,
                "r.residual_classification",
                libsql::Value::Text(classification.as_str().to_string()),
            );
        }

        let sql = format!(
            "SELECT {SELECT_COLS} {FROM_JOINED}{} ORDER BY r.id",
            where_clause(&where_parts)
        );
        tracing::debug!(?filter, "listing risks");
        self.db()
            .fetch_all(&sql, libsql::params_from_iter(params), row_to_risk)
            .await
    }

    /// Get a single risk by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Core` with `InvalidFilter` for a non-positive
    /// id or `NotFound` if no such risk exists.
    pub async fn get_risk(&self, id: i64) -> Result<Risk, DatabaseError> {
        self.get_risk_with_extras(id).await.map(|(risk, _)| risk)
    }

    /// Get a risk together with its detail-only lookup names.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_risk`].
    pub async fn get_risk_with_extras(&self, id: i64) -> Result<(Risk, RiskExtras), DatabaseError> {
        let id = validate_id("risk_id", id)?;
        tracing::debug!(id, "fetching risk");
        self.db()
            .fetch_optional(
                &format!("SELECT {SELECT_COLS} {FROM_JOINED} WHERE r.id = ?1"),
                [id],
                row_to_risk_with_extras,
            )
            .await?
            .ok_or_else(|| CoreError::not_found(EntityType::Risk.as_str(), id).into())
    }

    /// Location, status and scores of every risk in `scope`, in id order.
    ///
    /// Descriptive and audit columns are not read, so a malformed timestamp
    /// elsewhere on the row cannot fail a summary.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn list_ratings(&self, scope: RiskScope) -> Result<Vec<RiskRating>, DatabaseError> {
        let (clause, params) = self.scope_filter(scope, 1);
        let sql = format!("SELECT {RATING_COLS} {FROM_RATING}{clause} ORDER BY r.id");
        self.db()
            .fetch_all(&sql, libsql::params_from_iter(params), row_to_rating)
            .await
    }

    /// Count risks in `scope`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn count_risks(&self, scope: RiskScope) -> Result<u64, DatabaseError> {
        let (clause, params) = self.scope_filter(scope, 1);
        self.db()
            .fetch_count(
                &format!("SELECT COUNT(*) FROM risks r{clause}"),
                libsql::params_from_iter(params),
            )
            .await
    }

    /// Count risks in `scope` per status name, in status id order.
    ///
    /// Risks without a status come first with a `None` name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn count_risks_by_status(
        &self,
        scope: RiskScope,
    ) -> Result<Vec<(Option<String>, u64)>, DatabaseError> {
        let (clause, params) = self.scope_filter(scope, 1);
        let sql = format!(
            "SELECT s.name, COUNT(*) FROM risks r \
             LEFT JOIN risk_statuses s ON s.id = r.status_id{clause} \
             GROUP BY r.status_id, s.name ORDER BY r.status_id"
        );
        self.db()
            .fetch_all(&sql, libsql::params_from_iter(params), row_to_status_count)
            .await
    }

    /// Count classified risks in `scope` per residual classification.
    ///
    /// Unclassified risks are not counted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn count_risks_by_classification(
        &self,
        scope: RiskScope,
    ) -> Result<Vec<(String, u64)>, DatabaseError> {
        let (clause, params) = self.scope_filter(scope, 1);
        let classified = if clause.is_empty() {
            " WHERE r.residual_classification IS NOT NULL".to_string()
        } else {
            format!("{clause} AND r.residual_classification IS NOT NULL")
        };
        let sql = format!(
            "SELECT r.residual_classification, COUNT(*) FROM risks r{classified} \
             GROUP BY r.residual_classification ORDER BY r.residual_classification"
        );
        self.db()
            .fetch_all(&sql, libsql::params_from_iter(params), row_to_classification_count)
            .await
    }

    /// Mean residual score of scored risks in `scope`, `None` if none are
    /// scored.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or times out.
    pub async fn average_residual_score(
        &self,
        scope: RiskScope,
    ) -> Result<Option<f64>, DatabaseError> {
        let (clause, params) = self.scope_filter(scope, 1);
        let avg = self
            .db()
            .fetch_optional(
                &format!("SELECT AVG(r.residual_score) FROM risks r{clause}"),
                libsql::params_from_iter(params),
                |row| Ok(row.get::<Option<f64>>(0)?),
            )
            .await?
            .flatten();
        Ok(avg)
    }

    /// `WHERE` clause (with leading space) and params for `scope`.
    fn scope_filter(&self, scope: RiskScope, param_idx: usize) -> (String, Vec<libsql::Value>) {
        match scope {
            RiskScope::All => (String::new(), Vec::new()),
            RiskScope::Reporting => {
                let (clause, params) = self.scope_clause(param_idx);
                if clause.is_empty() {
                    (clause, params)
                } else {
                    (format!(" WHERE {clause}"), params)
                }
            }
        }
    }
}
