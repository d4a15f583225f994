//! Caller-facing catalog error kinds.
//!
//! # Invariants
//! - Validation, not-found and referential-integrity failures are detected
//!   before any durable write on creation paths.
//! - Storage failures are surfaced unchanged, never retried or masked.

use crate::model::activity::ActivityId;
use crate::repo::RepoError;
use crate::search::SearchError;
use crate::spatial::GeoQueryError;
use std::fmt::{Display, Formatter};

/// Result type for catalog use-case operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Entity kind named by [`CatalogError::NotFound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Activity,
    Building,
    Organization,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Activity => write!(f, "activity"),
            Self::Building => write!(f, "building"),
            Self::Organization => write!(f, "organization"),
        }
    }
}

/// Errors returned by catalog services and the use-case API.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Input rejected by a business rule (nesting depth, blank names,
    /// malformed coordinates).
    #[error("validation failed: {0}")]
    Validation(String),
    /// Referenced entity id does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: i64 },
    /// Supplied activity ids do not resolve; nothing was persisted.
    #[error(
        "activity ids do not resolve ({requested} requested): missing {missing:?}, duplicated {duplicated:?}"
    )]
    ReferentialIntegrity {
        requested: usize,
        missing: Vec<ActivityId>,
        duplicated: Vec<ActivityId>,
    },
    /// Persistence failure.
    #[error("{0}")]
    Storage(RepoError),
    /// Search query failure.
    #[error("{0}")]
    Search(#[from] SearchError),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity: EntityKind, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

impl From<RepoError> for CatalogError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::BuildingNotFound(id) => Self::not_found(EntityKind::Building, id),
            RepoError::OrganizationNotFound(id) => Self::not_found(EntityKind::Organization, id),
            RepoError::UnresolvedActivities {
                requested,
                missing,
                duplicated,
            } => Self::ReferentialIntegrity {
                requested,
                missing,
                duplicated,
            },
            other => Self::Storage(other),
        }
    }
}

impl From<GeoQueryError> for CatalogError {
    fn from(value: GeoQueryError) -> Self {
        Self::Validation(value.to_string())
    }
}
