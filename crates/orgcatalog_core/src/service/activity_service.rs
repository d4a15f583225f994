//! Activity hierarchy use-case service.
//!
//! # Responsibility
//! - Validate nesting depth before an activity is persisted.
//! - Compute activity depth and expand a root into its descendants.
//!
//! # Invariants
//! - No activity is created below depth [`MAX_ACTIVITY_DEPTH`].
//! - Parent-chain walks and descendant expansion are structurally bounded
//!   by [`MAX_ACTIVITY_DEPTH`], whatever shape the stored data has.

use crate::error::{CatalogError, CatalogResult, EntityKind};
use crate::model::activity::{Activity, ActivityId, MAX_ACTIVITY_DEPTH};
use crate::repo::activity_repo::ActivityRepository;
use log::{info, warn};
use std::collections::HashSet;

/// Activity taxonomy service facade.
pub struct ActivityService<R: ActivityRepository> {
    repo: R,
}

impl<R: ActivityRepository> ActivityService<R> {
    /// Creates service from repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one activity under an optional parent.
    ///
    /// # Errors
    /// - `Validation` when the name is blank or the parent already sits at
    ///   the maximum depth.
    /// - `NotFound` when `parent_id` does not resolve.
    pub fn create_activity(
        &self,
        name: impl Into<String>,
        parent_id: Option<ActivityId>,
    ) -> CatalogResult<Activity> {
        let name = normalize_name(name.into())?;

        if let Some(parent_id) = parent_id {
            let parent = self
                .repo
                .get_activity(parent_id)?
                .ok_or(CatalogError::not_found(EntityKind::Activity, parent_id))?;
            let parent_depth = self.depth_from(&parent)?;
            if parent_depth >= MAX_ACTIVITY_DEPTH {
                warn!(
                    "event=activity_create module=hierarchy status=rejected reason=max_depth parent_id={} parent_depth={}",
                    parent_id, parent_depth
                );
                return Err(CatalogError::validation("max nesting depth exceeded"));
            }
        }

        let activity = self.repo.create_activity(name.as_str(), parent_id)?;
        info!(
            "event=activity_create module=hierarchy status=ok activity_id={} has_parent={}",
            activity.id,
            parent_id.is_some()
        );
        Ok(activity)
    }

    /// Loads one activity by id.
    pub fn get_activity(&self, id: ActivityId) -> CatalogResult<Activity> {
        self.repo
            .get_activity(id)?
            .ok_or(CatalogError::not_found(EntityKind::Activity, id))
    }

    /// Lists every activity ordered by id.
    pub fn list_activities(&self) -> CatalogResult<Vec<Activity>> {
        Ok(self.repo.list_activities()?)
    }

    /// Returns the depth of an activity, a root being depth 1.
    ///
    /// The walk stops at a root or after [`MAX_ACTIVITY_DEPTH`] levels, so
    /// the result is always in `1..=MAX_ACTIVITY_DEPTH`; a cyclic chain
    /// reports the cap instead of looping.
    pub fn depth(&self, id: ActivityId) -> CatalogResult<u8> {
        let activity = self.get_activity(id)?;
        self.depth_from(&activity)
    }

    /// Returns the root activity named exactly `root_name` followed by its
    /// children, grandchildren and great-grandchildren, level by level.
    ///
    /// Returns an empty list when no activity has that name.
    pub fn descendants(&self, root_name: &str) -> CatalogResult<Vec<Activity>> {
        let Some(root) = self.repo.find_activity_by_name(root_name)? else {
            return Ok(Vec::new());
        };

        let mut visited = HashSet::from([root.id]);
        let mut frontier = vec![root.id];
        let mut collected = vec![root];

        for _ in 0..MAX_ACTIVITY_DEPTH {
            if frontier.is_empty() {
                break;
            }
            let children = self.repo.list_children(&frontier)?;
            frontier = Vec::with_capacity(children.len());
            for child in children {
                if visited.insert(child.id) {
                    frontier.push(child.id);
                    collected.push(child);
                }
            }
        }

        Ok(collected)
    }

    fn depth_from(&self, activity: &Activity) -> CatalogResult<u8> {
        let mut depth = 1;
        let mut parent_id = activity.parent_id;
        while depth < MAX_ACTIVITY_DEPTH {
            let Some(current) = parent_id else {
                break;
            };
            depth += 1;
            parent_id = self
                .repo
                .get_activity(current)?
                .and_then(|parent| parent.parent_id);
        }
        Ok(depth)
    }
}

fn normalize_name(value: String) -> CatalogResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::validation("activity name must not be blank"));
    }
    Ok(trimmed.to_string())
}
