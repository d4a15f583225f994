//! Organization read model and creation request.
//!
//! # Invariants
//! - `building_id` references exactly one building.
//! - `activity_ids` is the persisted association set: unique, ascending.
//! - `phones` is stored as one opaque string.

use crate::model::activity::ActivityId;
use crate::model::building::BuildingId;
use serde::{Deserialize, Serialize};

/// Stable identifier for one organization.
pub type OrganizationId = i64;

/// Canonical organization view, including its resolved activity ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrganizationId,
    /// Taxpayer identifier, carried as-is.
    pub inn: String,
    pub name: String,
    pub phones: String,
    pub building_id: BuildingId,
    pub activity_ids: Vec<ActivityId>,
}

/// Input for creating one organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrganization {
    pub inn: String,
    pub name: String,
    pub phones: String,
    pub building_id: BuildingId,
    /// Requested activity ids; every id must resolve.
    pub activity_ids: Vec<ActivityId>,
}
