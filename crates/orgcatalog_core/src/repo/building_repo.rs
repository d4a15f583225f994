//! Building repository contracts and SQLite implementation.

use crate::model::building::{Building, BuildingId};
use crate::repo::{ensure_connection_ready, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const BUILDING_SELECT_SQL: &str = "SELECT
    id,
    address,
    latitude,
    longitude
FROM buildings";

/// Repository interface for buildings.
pub trait BuildingRepository {
    fn create_building(&self, address: &str, latitude: f64, longitude: f64)
        -> RepoResult<Building>;
    fn get_building(&self, id: BuildingId) -> RepoResult<Option<Building>>;
    fn list_buildings(&self) -> RepoResult<Vec<Building>>;
}

/// SQLite-backed building repository.
pub struct SqliteBuildingRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBuildingRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["buildings"])?;
        Ok(Self { conn })
    }
}

impl BuildingRepository for SqliteBuildingRepository<'_> {
    fn create_building(
        &self,
        address: &str,
        latitude: f64,
        longitude: f64,
    ) -> RepoResult<Building> {
        self.conn.execute(
            "INSERT INTO buildings (address, latitude, longitude) VALUES (?1, ?2, ?3);",
            params![address, latitude, longitude],
        )?;

        Ok(Building {
            id: self.conn.last_insert_rowid(),
            address: address.to_string(),
            latitude,
            longitude,
        })
    }

    fn get_building(&self, id: BuildingId) -> RepoResult<Option<Building>> {
        let building = self
            .conn
            .query_row(
                &format!("{BUILDING_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_building_row,
            )
            .optional()?;
        Ok(building)
    }

    fn list_buildings(&self) -> RepoResult<Vec<Building>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BUILDING_SELECT_SQL} ORDER BY id ASC;"))?;
        let buildings = stmt
            .query_map([], parse_building_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(buildings)
    }
}

fn parse_building_row(row: &Row<'_>) -> rusqlite::Result<Building> {
    Ok(Building {
        id: row.get("id")?,
        address: row.get("address")?,
        latitude: row.get("latitude")?,
        longitude: row.get("longitude")?,
    })
}
