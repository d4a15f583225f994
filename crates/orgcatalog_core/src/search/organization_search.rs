//! Case-insensitive substring search over organizations.
//!
//! # Invariants
//! - Each supplied pattern is a Unicode case-insensitive substring match.
//! - Patterns are matched verbatim (whitespace included); only absent or
//!   empty patterns impose no constraint. Supplied patterns are ANDed.
//! - Results are distinct by organization id and ordered by id.

use crate::db::{DbError, FOLD_CONTAINS_FN};
use crate::model::organization::Organization;
use crate::repo::organization_repo::{parse_organization_row, with_activity_ids};
use crate::repo::RepoError;
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error for DB interaction and result decoding.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("{0}")]
    Db(#[from] DbError),
    #[error("{0}")]
    Repo(#[from] RepoError),
}

impl From<rusqlite::Error> for SearchError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Optional patterns for organization search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Matched against organization name.
    pub name: Option<String>,
    /// Matched against the building address.
    pub address: Option<String>,
    /// Matched against the name of any linked activity.
    pub activity: Option<String>,
}

impl SearchQuery {
    /// Creates a query with no constraints (matches every organization).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, pattern: impl Into<String>) -> Self {
        self.name = Some(pattern.into());
        self
    }

    pub fn address(mut self, pattern: impl Into<String>) -> Self {
        self.address = Some(pattern.into());
        self
    }

    pub fn activity(mut self, pattern: impl Into<String>) -> Self {
        self.activity = Some(pattern.into());
        self
    }
}

/// Searches organizations by name, building address and activity name.
///
/// Returns every organization when no pattern is supplied.
pub fn search_organizations(
    conn: &Connection,
    query: &SearchQuery,
) -> SearchResult<Vec<Organization>> {
    let name = normalize_pattern(query.name.as_deref());
    let address = normalize_pattern(query.address.as_deref());
    let activity = normalize_pattern(query.activity.as_deref());

    let mut sql = String::from(
        "SELECT DISTINCT
            o.id AS id,
            o.inn AS inn,
            o.name AS name,
            o.phones AS phones,
            o.building_id AS building_id
         FROM organizations o",
    );
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_values: Vec<Value> = Vec::new();

    if address.is_some() {
        sql.push_str(" INNER JOIN buildings b ON b.id = o.building_id");
    }
    if activity.is_some() {
        sql.push_str(
            " INNER JOIN organization_activities oa ON oa.organization_id = o.id
              INNER JOIN activities a ON a.id = oa.activity_id",
        );
    }

    for (column, pattern) in [("o.name", name), ("b.address", address), ("a.name", activity)] {
        if let Some(pattern) = pattern {
            conditions.push(format!("{FOLD_CONTAINS_FN}({column}, ?)"));
            bind_values.push(Value::Text(pattern.to_string()));
        }
    }

    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY o.id ASC;");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(bind_values), parse_organization_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let organizations = rows
        .into_iter()
        .map(|organization| with_activity_ids(conn, organization))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "event=organization_search module=search status=ok filters={} hits={}",
        conditions.len(),
        organizations.len()
    );
    Ok(organizations)
}

fn normalize_pattern(pattern: Option<&str>) -> Option<&str> {
    pattern.filter(|value| !value.is_empty())
}
