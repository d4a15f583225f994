//! Use-case API for boundary callers (CLI, HTTP adapters).
//!
//! # Responsibility
//! - Expose one entry point per catalog use case over a single connection.
//! - Wire SQLite repositories into services so callers never see storage.
//!
//! # Invariants
//! - Each call runs to completion on the borrowed connection.
//! - Errors are returned as [`CatalogError`], never panics.

use crate::error::CatalogResult;
use crate::model::activity::{Activity, ActivityId};
use crate::model::building::{Building, BuildingId};
use crate::model::organization::{NewOrganization, Organization, OrganizationId};
use crate::repo::activity_repo::SqliteActivityRepository;
use crate::repo::building_repo::SqliteBuildingRepository;
use crate::repo::organization_repo::SqliteOrganizationRepository;
use crate::search::{search_organizations, SearchQuery};
use crate::service::activity_service::ActivityService;
use crate::service::building_service::BuildingService;
use crate::service::organization_service::OrganizationService;
use crate::spatial::{BoundingBox, GeoQuery};
use rusqlite::Connection;

type SqliteOrganizationService<'conn> =
    OrganizationService<SqliteOrganizationRepository<'conn>, SqliteActivityRepository<'conn>>;

/// Catalog use-case facade bound to one migrated connection.
pub struct CatalogApi<'conn> {
    conn: &'conn Connection,
    buildings: BuildingService<SqliteBuildingRepository<'conn>>,
    organizations: SqliteOrganizationService<'conn>,
}

impl<'conn> CatalogApi<'conn> {
    /// Builds the facade, checking the connection schema once.
    pub fn try_new(conn: &'conn Connection) -> CatalogResult<Self> {
        let hierarchy = ActivityService::new(SqliteActivityRepository::try_new(conn)?);
        Ok(Self {
            conn,
            buildings: BuildingService::new(SqliteBuildingRepository::try_new(conn)?),
            organizations: OrganizationService::new(
                SqliteOrganizationRepository::try_new(conn)?,
                hierarchy,
            ),
        })
    }

    pub fn create_activity(
        &self,
        name: &str,
        parent_id: Option<ActivityId>,
    ) -> CatalogResult<Activity> {
        self.activities().create_activity(name, parent_id)
    }

    pub fn get_activity(&self, id: ActivityId) -> CatalogResult<Activity> {
        self.activities().get_activity(id)
    }

    pub fn list_activities(&self) -> CatalogResult<Vec<Activity>> {
        self.activities().list_activities()
    }

    /// Root activity plus up to three generations below it.
    pub fn get_descendants(&self, root_name: &str) -> CatalogResult<Vec<Activity>> {
        self.activities().descendants(root_name)
    }

    pub fn get_activity_depth(&self, id: ActivityId) -> CatalogResult<u8> {
        self.activities().depth(id)
    }

    pub fn create_building(
        &self,
        address: &str,
        latitude: f64,
        longitude: f64,
    ) -> CatalogResult<Building> {
        self.buildings.create_building(address, latitude, longitude)
    }

    pub fn get_building(&self, id: BuildingId) -> CatalogResult<Building> {
        self.buildings.get_building(id)
    }

    pub fn list_buildings(&self) -> CatalogResult<Vec<Building>> {
        self.buildings.list_buildings()
    }

    pub fn create_organization(
        &self,
        inn: &str,
        name: &str,
        phones: &str,
        building_id: BuildingId,
        activity_ids: &[ActivityId],
    ) -> CatalogResult<Organization> {
        self.organizations.create_organization(NewOrganization {
            inn: inn.to_string(),
            name: name.to_string(),
            phones: phones.to_string(),
            building_id,
            activity_ids: activity_ids.to_vec(),
        })
    }

    pub fn get_organization(&self, id: OrganizationId) -> CatalogResult<Organization> {
        self.organizations.get_organization(id)
    }

    pub fn list_organizations(&self) -> CatalogResult<Vec<Organization>> {
        self.organizations.list_organizations()
    }

    pub fn list_organizations_by_building(
        &self,
        building_id: BuildingId,
    ) -> CatalogResult<Vec<Organization>> {
        self.organizations.list_by_building(building_id)
    }

    pub fn list_organizations_by_activity(
        &self,
        activity_name: &str,
    ) -> CatalogResult<Vec<Organization>> {
        self.organizations.list_by_activity(activity_name)
    }

    pub fn list_organizations_by_activity_tree(
        &self,
        root_activity_name: &str,
    ) -> CatalogResult<Vec<Organization>> {
        self.organizations.list_by_activity_tree(root_activity_name)
    }

    /// Radius wins over `bbox`; with neither, every located organization
    /// is returned.
    pub fn list_organizations_by_geo(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: Option<f64>,
        bbox: Option<BoundingBox>,
    ) -> CatalogResult<Vec<Organization>> {
        let query = GeoQuery {
            latitude,
            longitude,
            radius_km,
            bbox,
        };
        self.organizations.list_by_geo(&query)
    }

    pub fn search_organizations(
        &self,
        name_pattern: Option<&str>,
        address_pattern: Option<&str>,
        activity_pattern: Option<&str>,
    ) -> CatalogResult<Vec<Organization>> {
        let query = SearchQuery {
            name: name_pattern.map(str::to_string),
            address: address_pattern.map(str::to_string),
            activity: activity_pattern.map(str::to_string),
        };
        Ok(search_organizations(self.conn, &query)?)
    }

    pub fn replace_organization_activities(
        &self,
        id: OrganizationId,
        activity_ids: &[ActivityId],
    ) -> CatalogResult<Organization> {
        self.organizations.replace_activities(id, activity_ids)
    }

    fn activities(&self) -> &ActivityService<SqliteActivityRepository<'conn>> {
        self.organizations.hierarchy()
    }
}
