//! Repository access layer: one module per entity kind.
//!
//! Every operation is read-only, validates its identifiers and filters
//! before querying, and returns rows in primary-key order.

pub mod action_plan;
pub mod comment;
pub mod control;
pub mod country;
pub mod risk;
pub mod role;
pub mod user;

/// Append `clause` to `where_parts` and `value` to `params` with the next
/// positional index.
pub(crate) fn push_condition(
    where_parts: &mut Vec<String>,
    params: &mut Vec<libsql::Value>,
    column: &str,
    value: libsql::Value,
) {
    params.push(value);
    where_parts.push(format!("{column} = ?{}", params.len()));
}

/// Render collected conditions as a `WHERE` clause, or nothing.
pub(crate) fn where_clause(where_parts: &[String]) -> String {
    if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    }
}
