//! Building registry use-case service.
//!
//! # Invariants
//! - Addresses are trimmed and non-blank.
//! - Coordinates are finite, latitude within ±90 and longitude within ±180.

use crate::error::{CatalogError, CatalogResult, EntityKind};
use crate::model::building::{Building, BuildingId};
use crate::repo::building_repo::BuildingRepository;
use log::info;

/// Building service facade.
pub struct BuildingService<R: BuildingRepository> {
    repo: R,
}

impl<R: BuildingRepository> BuildingService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one building after validating address and coordinates.
    pub fn create_building(
        &self,
        address: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> CatalogResult<Building> {
        let address = address.into();
        let address = address.trim();
        if address.is_empty() {
            return Err(CatalogError::validation("building address must not be blank"));
        }
        validate_coordinates(latitude, longitude)?;

        let building = self.repo.create_building(address, latitude, longitude)?;
        info!(
            "event=building_create module=registry status=ok building_id={}",
            building.id
        );
        Ok(building)
    }

    pub fn get_building(&self, id: BuildingId) -> CatalogResult<Building> {
        self.repo
            .get_building(id)?
            .ok_or(CatalogError::not_found(EntityKind::Building, id))
    }

    pub fn list_buildings(&self) -> CatalogResult<Vec<Building>> {
        Ok(self.repo.list_buildings()?)
    }
}

fn validate_coordinates(latitude: f64, longitude: f64) -> CatalogResult<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(CatalogError::validation(format!(
            "latitude must be within [-90, 90], got {latitude}"
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(CatalogError::validation(format!(
            "longitude must be within [-180, 180], got {longitude}"
        )));
    }
    Ok(())
}
