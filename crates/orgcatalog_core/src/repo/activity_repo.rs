//! Activity taxonomy repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist activity nodes and their parent references.
//! - Provide the lookups hierarchy expansion needs: by id, by exact name and
//!   by parent ids.
//!
//! # Invariants
//! - Listing is deterministic: `id ASC`.
//! - Name lookup is exact; when names repeat the lowest id wins.
//! - Depth rules live in the service layer, not here.

use crate::model::activity::{Activity, ActivityId};
use crate::repo::{ensure_connection_ready, placeholders, RepoResult};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const ACTIVITY_SELECT_SQL: &str = "SELECT
    id,
    name,
    parent_id
FROM activities";

/// Repository interface for the activity taxonomy.
pub trait ActivityRepository {
    /// Inserts one activity and returns the stored row.
    fn create_activity(&self, name: &str, parent_id: Option<ActivityId>)
        -> RepoResult<Activity>;
    /// Loads one activity by id.
    fn get_activity(&self, id: ActivityId) -> RepoResult<Option<Activity>>;
    /// Lists every activity.
    fn list_activities(&self) -> RepoResult<Vec<Activity>>;
    /// Finds one activity by exact name.
    fn find_activity_by_name(&self, name: &str) -> RepoResult<Option<Activity>>;
    /// Lists direct children of any of the given parents.
    fn list_children(&self, parent_ids: &[ActivityId]) -> RepoResult<Vec<Activity>>;
}

/// SQLite-backed activity repository.
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["activities"])?;
        Ok(Self { conn })
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn create_activity(
        &self,
        name: &str,
        parent_id: Option<ActivityId>,
    ) -> RepoResult<Activity> {
        self.conn.execute(
            "INSERT INTO activities (name, parent_id) VALUES (?1, ?2);",
            params![name, parent_id],
        )?;

        Ok(Activity {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            parent_id,
        })
    }

    fn get_activity(&self, id: ActivityId) -> RepoResult<Option<Activity>> {
        let activity = self
            .conn
            .query_row(
                &format!("{ACTIVITY_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_activity_row,
            )
            .optional()?;
        Ok(activity)
    }

    fn list_activities(&self) -> RepoResult<Vec<Activity>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACTIVITY_SELECT_SQL} ORDER BY id ASC;"))?;
        let activities = stmt
            .query_map([], parse_activity_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(activities)
    }

    fn find_activity_by_name(&self, name: &str) -> RepoResult<Option<Activity>> {
        let activity = self
            .conn
            .query_row(
                &format!("{ACTIVITY_SELECT_SQL} WHERE name = ?1 ORDER BY id ASC LIMIT 1;"),
                [name],
                parse_activity_row,
            )
            .optional()?;
        Ok(activity)
    }

    fn list_children(&self, parent_ids: &[ActivityId]) -> RepoResult<Vec<Activity>> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "{ACTIVITY_SELECT_SQL} WHERE parent_id IN ({}) ORDER BY id ASC;",
            placeholders(parent_ids.len())
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let children = stmt
            .query_map(params_from_iter(parent_ids), parse_activity_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(children)
    }
}

fn parse_activity_row(row: &Row<'_>) -> rusqlite::Result<Activity> {
    Ok(Activity {
        id: row.get("id")?,
        name: row.get("name")?,
        parent_id: row.get("parent_id")?,
    })
}
