//! Organization repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist organizations and their organization <-> activity association.
//! - Serve the foreign-key lookups the catalog needs (by building, by
//!   activity name, by activity id set, joined with buildings).
//!
//! # Invariants
//! - Creation and activity replacement are all-or-nothing: building check,
//!   activity resolution, row insert and association writes share one
//!   IMMEDIATE transaction.
//! - Requested activity ids must resolve to a distinct set of the same size.
//! - Returned `activity_ids` are read back from storage, ascending.
//! - Listing is deterministic: `organizations.id ASC`, no duplicates.

use crate::model::activity::ActivityId;
use crate::model::building::{Building, BuildingId};
use crate::model::organization::{NewOrganization, Organization, OrganizationId};
use crate::repo::{ensure_connection_ready, placeholders, RepoError, RepoResult};
use rusqlite::{
    params, params_from_iter, Connection, OptionalExtension, Row, Transaction, TransactionBehavior,
};
use std::collections::{BTreeSet, HashSet};

const ORGANIZATION_SELECT_SQL: &str = "SELECT
    o.id AS id,
    o.inn AS inn,
    o.name AS name,
    o.phones AS phones,
    o.building_id AS building_id
FROM organizations o";

/// Repository interface for organizations and their activity links.
pub trait OrganizationRepository {
    /// Atomically creates one organization with its full activity set.
    fn create_organization(&self, request: &NewOrganization) -> RepoResult<Organization>;
    /// Loads one organization by id.
    fn get_organization(&self, id: OrganizationId) -> RepoResult<Option<Organization>>;
    /// Lists every organization.
    fn list_organizations(&self) -> RepoResult<Vec<Organization>>;
    /// Lists organizations situated in one building.
    fn list_by_building(&self, building_id: BuildingId) -> RepoResult<Vec<Organization>>;
    /// Lists organizations linked to an activity with exactly this name.
    fn list_by_activity_name(&self, activity_name: &str) -> RepoResult<Vec<Organization>>;
    /// Lists organizations linked to any of the given activities.
    fn list_by_activity_ids(&self, activity_ids: &[ActivityId]) -> RepoResult<Vec<Organization>>;
    /// Lists every organization with its building, `None` when the building
    /// reference does not resolve.
    fn list_with_buildings(&self) -> RepoResult<Vec<(Organization, Option<Building>)>>;
    /// Atomically clears and re-sets the activity set of one organization.
    fn replace_activities(
        &self,
        id: OrganizationId,
        activity_ids: &[ActivityId],
    ) -> RepoResult<Organization>;
}

/// SQLite-backed organization repository.
pub struct SqliteOrganizationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOrganizationRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(
            conn,
            &[
                "organizations",
                "organization_activities",
                "buildings",
                "activities",
            ],
        )?;
        Ok(Self { conn })
    }
}

impl OrganizationRepository for SqliteOrganizationRepository<'_> {
    fn create_organization(&self, request: &NewOrganization) -> RepoResult<Organization> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        ensure_building_exists(&tx, request.building_id)?;
        let activity_ids = resolve_activity_ids(&tx, &request.activity_ids)?;

        tx.execute(
            "INSERT INTO organizations (inn, name, phones, building_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                request.inn.as_str(),
                request.name.as_str(),
                request.phones.as_str(),
                request.building_id,
            ],
        )?;
        let id = tx.last_insert_rowid();
        insert_associations(&tx, id, &activity_ids)?;

        tx.commit()?;
        load_required_organization(self.conn, id)
    }

    fn get_organization(&self, id: OrganizationId) -> RepoResult<Option<Organization>> {
        let row = self
            .conn
            .query_row(
                &format!("{ORGANIZATION_SELECT_SQL} WHERE o.id = ?1;"),
                [id],
                parse_organization_row,
            )
            .optional()?;

        match row {
            Some(organization) => Ok(Some(with_activity_ids(self.conn, organization)?)),
            None => Ok(None),
        }
    }

    fn list_organizations(&self) -> RepoResult<Vec<Organization>> {
        query_organizations(
            self.conn,
            &format!("{ORGANIZATION_SELECT_SQL} ORDER BY o.id ASC;"),
            [],
        )
    }

    fn list_by_building(&self, building_id: BuildingId) -> RepoResult<Vec<Organization>> {
        query_organizations(
            self.conn,
            &format!("{ORGANIZATION_SELECT_SQL} WHERE o.building_id = ?1 ORDER BY o.id ASC;"),
            [building_id],
        )
    }

    fn list_by_activity_name(&self, activity_name: &str) -> RepoResult<Vec<Organization>> {
        query_organizations(
            self.conn,
            &format!(
                "{ORGANIZATION_SELECT_SQL}
                 WHERE EXISTS(
                    SELECT 1
                    FROM organization_activities oa
                    INNER JOIN activities a ON a.id = oa.activity_id
                    WHERE oa.organization_id = o.id
                      AND a.name = ?1
                 )
                 ORDER BY o.id ASC;"
            ),
            [activity_name],
        )
    }

    fn list_by_activity_ids(&self, activity_ids: &[ActivityId]) -> RepoResult<Vec<Organization>> {
        if activity_ids.is_empty() {
            return Ok(Vec::new());
        }

        query_organizations(
            self.conn,
            &format!(
                "{ORGANIZATION_SELECT_SQL}
                 WHERE EXISTS(
                    SELECT 1
                    FROM organization_activities oa
                    WHERE oa.organization_id = o.id
                      AND oa.activity_id IN ({})
                 )
                 ORDER BY o.id ASC;",
                placeholders(activity_ids.len())
            ),
            params_from_iter(activity_ids),
        )
    }

    fn list_with_buildings(&self) -> RepoResult<Vec<(Organization, Option<Building>)>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                o.id AS id,
                o.inn AS inn,
                o.name AS name,
                o.phones AS phones,
                o.building_id AS building_id,
                b.id AS b_id,
                b.address AS b_address,
                b.latitude AS b_latitude,
                b.longitude AS b_longitude
             FROM organizations o
             LEFT JOIN buildings b ON b.id = o.building_id
             ORDER BY o.id ASC;",
        )?;

        let rows = stmt
            .query_map([], |row| {
                let organization = parse_organization_row(row)?;
                let building = match row.get::<_, Option<BuildingId>>("b_id")? {
                    Some(id) => Some(Building {
                        id,
                        address: row.get("b_address")?,
                        latitude: row.get("b_latitude")?,
                        longitude: row.get("b_longitude")?,
                    }),
                    None => None,
                };
                Ok((organization, building))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(organization, building)| {
                Ok((with_activity_ids(self.conn, organization)?, building))
            })
            .collect()
    }

    fn replace_activities(
        &self,
        id: OrganizationId,
        activity_ids: &[ActivityId],
    ) -> RepoResult<Organization> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let exists: i64 = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM organizations WHERE id = ?1);",
            [id],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::OrganizationNotFound(id));
        }

        let resolved = resolve_activity_ids(&tx, activity_ids)?;
        tx.execute(
            "DELETE FROM organization_activities WHERE organization_id = ?1;",
            [id],
        )?;
        insert_associations(&tx, id, &resolved)?;

        tx.commit()?;
        load_required_organization(self.conn, id)
    }
}

fn ensure_building_exists(conn: &Connection, building_id: BuildingId) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM buildings WHERE id = ?1);",
        [building_id],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(RepoError::BuildingNotFound(building_id));
    }
    Ok(())
}

/// Resolves requested ids against stored activities.
///
/// Fails unless the resolved set has exactly as many members as ids were
/// requested, so unknown ids and repeated ids are both rejected.
fn resolve_activity_ids(
    conn: &Connection,
    requested: &[ActivityId],
) -> RepoResult<Vec<ActivityId>> {
    let mut resolved = BTreeSet::new();
    if !requested.is_empty() {
        let sql = format!(
            "SELECT id FROM activities WHERE id IN ({});",
            placeholders(requested.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(requested))?;
        while let Some(row) = rows.next()? {
            resolved.insert(row.get::<_, ActivityId>(0)?);
        }
    }

    if resolved.len() != requested.len() {
        let missing = requested
            .iter()
            .copied()
            .filter(|id| !resolved.contains(id))
            .collect::<BTreeSet<_>>();
        let mut seen = HashSet::new();
        let duplicated = requested
            .iter()
            .copied()
            .filter(|id| !seen.insert(*id))
            .collect::<BTreeSet<_>>();
        return Err(RepoError::UnresolvedActivities {
            requested: requested.len(),
            missing: missing.into_iter().collect(),
            duplicated: duplicated.into_iter().collect(),
        });
    }

    Ok(resolved.into_iter().collect())
}

fn insert_associations(
    conn: &Connection,
    organization_id: OrganizationId,
    activity_ids: &[ActivityId],
) -> RepoResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO organization_activities (organization_id, activity_id)
         VALUES (?1, ?2);",
    )?;
    for activity_id in activity_ids {
        stmt.execute(params![organization_id, activity_id])?;
    }
    Ok(())
}

fn load_required_organization(conn: &Connection, id: OrganizationId) -> RepoResult<Organization> {
    let organization = conn
        .query_row(
            &format!("{ORGANIZATION_SELECT_SQL} WHERE o.id = ?1;"),
            [id],
            parse_organization_row,
        )
        .optional()?
        .ok_or(RepoError::OrganizationNotFound(id))?;
    with_activity_ids(conn, organization)
}

fn query_organizations<P>(conn: &Connection, sql: &str, params: P) -> RepoResult<Vec<Organization>>
where
    P: rusqlite::Params,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, parse_organization_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter()
        .map(|organization| with_activity_ids(conn, organization))
        .collect()
}

/// Fills `activity_ids` from the association table.
pub(crate) fn with_activity_ids(
    conn: &Connection,
    mut organization: Organization,
) -> RepoResult<Organization> {
    let mut stmt = conn.prepare_cached(
        "SELECT activity_id
         FROM organization_activities
         WHERE organization_id = ?1
         ORDER BY activity_id ASC;",
    )?;
    organization.activity_ids = stmt
        .query_map([organization.id], |row| row.get(0))?
        .collect::<Result<Vec<ActivityId>, _>>()?;
    Ok(organization)
}

/// Parses the organization columns; `activity_ids` starts empty.
pub(crate) fn parse_organization_row(row: &Row<'_>) -> rusqlite::Result<Organization> {
    Ok(Organization {
        id: row.get("id")?,
        inn: row.get("inn")?,
        name: row.get("name")?,
        phones: row.get("phones")?,
        building_id: row.get("building_id")?,
        activity_ids: Vec::new(),
    })
}
