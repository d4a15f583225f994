//! Core query engine for the organization catalog.
//! This crate is the single source of truth for catalog business invariants:
//! the bounded-depth activity hierarchy, geographic filtering, multi-field
//! search and referentially intact organization creation.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;
pub mod spatial;

pub use api::CatalogApi;
pub use config::{default_log_level, CatalogConfig, ConfigError, DatabaseLocation};
pub use error::{CatalogError, CatalogResult, EntityKind};
pub use logging::{init_logging, LoggingError, LoggingOutcome};
pub use model::activity::{Activity, ActivityId, MAX_ACTIVITY_DEPTH};
pub use model::building::{Building, BuildingId};
pub use model::organization::{NewOrganization, Organization, OrganizationId};
pub use repo::activity_repo::{ActivityRepository, SqliteActivityRepository};
pub use repo::building_repo::{BuildingRepository, SqliteBuildingRepository};
pub use repo::organization_repo::{OrganizationRepository, SqliteOrganizationRepository};
pub use repo::{RepoError, RepoResult};
pub use search::{search_organizations, SearchError, SearchQuery, SearchResult};
pub use service::activity_service::ActivityService;
pub use service::building_service::BuildingService;
pub use service::organization_service::OrganizationService;
pub use spatial::{
    distance_km, in_bounding_box, BoundingBox, GeoPredicate, GeoQuery, GeoQueryError,
    EARTH_RADIUS_KM,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
