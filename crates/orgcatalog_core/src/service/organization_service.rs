//! Organization catalog use-case service.
//!
//! # Responsibility
//! - Create organizations with referential checks on building and activities.
//! - Serve organization reads by id, building, activity, activity subtree and
//!   geographic area.
//!
//! # Invariants
//! - A failed create or activity replacement leaves nothing visible.
//! - Returned organizations carry the persisted activity id list, not the
//!   caller-supplied one.
//! - Subtree queries delegate descendant expansion to [`ActivityService`].

use crate::error::{CatalogError, CatalogResult, EntityKind};
use crate::model::activity::ActivityId;
use crate::model::building::BuildingId;
use crate::model::organization::{NewOrganization, Organization, OrganizationId};
use crate::repo::activity_repo::ActivityRepository;
use crate::repo::organization_repo::OrganizationRepository;
use crate::service::activity_service::ActivityService;
use crate::spatial::{GeoPredicate, GeoQuery};
use log::{debug, info, warn};

/// Organization catalog service facade.
pub struct OrganizationService<O, A>
where
    O: OrganizationRepository,
    A: ActivityRepository,
{
    repo: O,
    hierarchy: ActivityService<A>,
}

impl<O, A> OrganizationService<O, A>
where
    O: OrganizationRepository,
    A: ActivityRepository,
{
    /// Creates service from an organization repository and the activity
    /// hierarchy used for subtree queries.
    pub fn new(repo: O, hierarchy: ActivityService<A>) -> Self {
        Self { repo, hierarchy }
    }

    /// Creates one organization with its activity set, all or nothing.
    ///
    /// # Errors
    /// - `Validation` when the organization name is blank.
    /// - `NotFound` when `building_id` does not resolve.
    /// - `ReferentialIntegrity` when any activity id does not resolve or
    ///   repeats.
    pub fn create_organization(&self, request: NewOrganization) -> CatalogResult<Organization> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(CatalogError::validation(
                "organization name must not be blank",
            ));
        }
        let request = NewOrganization {
            name: name.to_string(),
            ..request
        };

        match self.repo.create_organization(&request) {
            Ok(organization) => {
                info!(
                    "event=organization_create module=catalog status=ok organization_id={} building_id={} activity_count={}",
                    organization.id,
                    organization.building_id,
                    organization.activity_ids.len()
                );
                Ok(organization)
            }
            Err(err) => {
                let err = CatalogError::from(err);
                warn!(
                    "event=organization_create module=catalog status=error building_id={} requested_activities={} error={}",
                    request.building_id,
                    request.activity_ids.len(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Loads one organization by id.
    pub fn get_organization(&self, id: OrganizationId) -> CatalogResult<Organization> {
        self.repo
            .get_organization(id)?
            .ok_or(CatalogError::not_found(EntityKind::Organization, id))
    }

    /// Lists every organization.
    pub fn list_organizations(&self) -> CatalogResult<Vec<Organization>> {
        Ok(self.repo.list_organizations()?)
    }

    /// Lists organizations in one building; unknown buildings yield none.
    pub fn list_by_building(&self, building_id: BuildingId) -> CatalogResult<Vec<Organization>> {
        Ok(self.repo.list_by_building(building_id)?)
    }

    /// Lists organizations linked to an activity named exactly `activity_name`.
    pub fn list_by_activity(&self, activity_name: &str) -> CatalogResult<Vec<Organization>> {
        Ok(self.repo.list_by_activity_name(activity_name)?)
    }

    /// Lists organizations linked to the named root activity or any of its
    /// descendants, each organization once.
    pub fn list_by_activity_tree(&self, root_name: &str) -> CatalogResult<Vec<Organization>> {
        let activities = self.hierarchy.descendants(root_name)?;
        if activities.is_empty() {
            return Ok(Vec::new());
        }

        let activity_ids = activities
            .iter()
            .map(|activity| activity.id)
            .collect::<Vec<_>>();
        let organizations = self.repo.list_by_activity_ids(&activity_ids)?;
        debug!(
            "event=organization_tree_query module=catalog status=ok activities={} hits={}",
            activity_ids.len(),
            organizations.len()
        );
        Ok(organizations)
    }

    /// Lists organizations whose building passes the geographic filter.
    ///
    /// Organizations whose building does not resolve are always excluded.
    pub fn list_by_geo(&self, query: &GeoQuery) -> CatalogResult<Vec<Organization>> {
        let predicate = GeoPredicate::from_query(query)?;

        let organizations = self
            .repo
            .list_with_buildings()?
            .into_iter()
            .filter_map(|(organization, building)| {
                let building = building?;
                predicate
                    .matches(building.location())
                    .then_some(organization)
            })
            .collect::<Vec<_>>();

        debug!(
            "event=organization_geo_query module=catalog status=ok mode={} hits={}",
            predicate_mode(&predicate),
            organizations.len()
        );
        Ok(organizations)
    }

    /// Replaces the full activity set of one organization, all or nothing.
    pub fn replace_activities(
        &self,
        id: OrganizationId,
        activity_ids: &[ActivityId],
    ) -> CatalogResult<Organization> {
        let organization = self.repo.replace_activities(id, activity_ids)?;
        info!(
            "event=organization_activities_replace module=catalog status=ok organization_id={} activity_count={}",
            organization.id,
            organization.activity_ids.len()
        );
        Ok(organization)
    }

    /// The activity hierarchy this catalog delegates to.
    pub fn hierarchy(&self) -> &ActivityService<A> {
        &self.hierarchy
    }
}

fn predicate_mode(predicate: &GeoPredicate) -> &'static str {
    match predicate {
        GeoPredicate::Radius { .. } => "radius",
        GeoPredicate::Within(_) => "bbox",
        GeoPredicate::Unfiltered => "none",
    }
}
