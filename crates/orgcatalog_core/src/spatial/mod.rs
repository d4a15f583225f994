//! Geographic filtering primitives.
//!
//! # Responsibility
//! - Great-circle distance between latitude/longitude points.
//! - Bounding-box containment and the radius-vs-box filtering policy.
//!
//! # Invariants
//! - Pure computation: no storage access, no state.
//! - Bounds are inclusive; there is no antimeridian wraparound.

pub mod distance;
pub mod filter;

pub use distance::{distance_between, distance_km, EARTH_RADIUS_KM};
pub use filter::{in_bounding_box, BoundingBox, GeoPredicate, GeoQuery, GeoQueryError};
