//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per entity kind.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Every relationship traversal is an explicit repository call.
//! - Multi-statement writes run inside one IMMEDIATE transaction and roll
//!   back on any failure.
//! - Repository APIs return semantic errors (`BuildingNotFound`,
//!   `UnresolvedActivities`) in addition to DB transport errors.

pub mod activity_repo;
pub mod building_repo;
pub mod organization_repo;

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::activity::ActivityId;
use crate::model::building::BuildingId;
use crate::model::organization::OrganizationId;
use rusqlite::Connection;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for catalog persistence and query operations.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{0}")]
    Db(#[from] DbError),
    /// Referenced building does not exist.
    #[error("building not found: {0}")]
    BuildingNotFound(BuildingId),
    /// Referenced organization does not exist.
    #[error("organization not found: {0}")]
    OrganizationNotFound(OrganizationId),
    /// Requested activity ids did not resolve to a set of equal size.
    #[error(
        "activity ids do not resolve: requested {requested}, missing {missing:?}, duplicated {duplicated:?}"
    )]
    UnresolvedActivities {
        requested: usize,
        missing: Vec<ActivityId>,
        duplicated: Vec<ActivityId>,
    },
    /// Connection schema is not at the expected migrated version.
    #[error("catalog repository requires schema version {expected_version}, got {actual_version}")]
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    #[error("catalog repository requires table `{0}`")]
    MissingRequiredTable(&'static str),
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Verifies the connection is migrated and carries the given tables.
pub(crate) fn ensure_connection_ready(
    conn: &Connection,
    tables: &[&'static str],
) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in tables {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [*table],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable(*table));
        }
    }

    Ok(())
}

/// `?, ?, ?` bind list for an `IN (...)` clause.
pub(crate) fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
