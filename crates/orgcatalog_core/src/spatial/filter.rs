//! Radius and bounding-box filtering policy.
//!
//! # Invariants
//! - A usable radius (present and non-zero) wins over any bounding box.
//! - A bounding box is usable only when all four bounds are present.
//! - Without either, every located building passes.

use crate::spatial::distance::distance_between;
use geo::{Coord, Intersects, Point, Rect};

/// Errors for malformed geographic query input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoQueryError {
    #[error("reference point must be finite, got ({latitude}, {longitude})")]
    NonFiniteReference { latitude: f64, longitude: f64 },
    #[error("radius_km must be a finite non-negative number, got {0}")]
    InvalidRadius(f64),
    #[error("bounding box bounds must be finite")]
    NonFiniteBounds,
    #[error("bounding box minimum exceeds maximum for {axis}: {min} > {max}")]
    InvertedBounds {
        axis: &'static str,
        min: f64,
        max: f64,
    },
}

/// Returns whether `(lat, lon)` lies inside the box, edges included.
///
/// A box whose minimum exceeds its maximum contains nothing.
pub fn in_bounding_box(
    lat: f64,
    lon: f64,
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
) -> bool {
    if min_lat > max_lat || min_lon > max_lon {
        return false;
    }
    let rect = Rect::new(
        Coord {
            x: min_lon,
            y: min_lat,
        },
        Coord {
            x: max_lon,
            y: max_lat,
        },
    );
    rect.intersects(&Coord { x: lon, y: lat })
}

/// Latitude/longitude rectangle in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Builds a box only when all four bounds are supplied.
    pub fn from_parts(
        min_lat: Option<f64>,
        max_lat: Option<f64>,
        min_lon: Option<f64>,
        max_lon: Option<f64>,
    ) -> Option<Self> {
        Some(Self::new(min_lat?, max_lat?, min_lon?, max_lon?))
    }

    /// Returns whether the point lies inside this box, edges included.
    pub fn contains(&self, point: Point<f64>) -> bool {
        in_bounding_box(
            point.y(),
            point.x(),
            self.min_lat,
            self.max_lat,
            self.min_lon,
            self.max_lon,
        )
    }

    fn validate(&self) -> Result<(), GeoQueryError> {
        let bounds = [self.min_lat, self.max_lat, self.min_lon, self.max_lon];
        if bounds.iter().any(|value| !value.is_finite()) {
            return Err(GeoQueryError::NonFiniteBounds);
        }
        if self.min_lat > self.max_lat {
            return Err(GeoQueryError::InvertedBounds {
                axis: "latitude",
                min: self.min_lat,
                max: self.max_lat,
            });
        }
        if self.min_lon > self.max_lon {
            return Err(GeoQueryError::InvertedBounds {
                axis: "longitude",
                min: self.min_lon,
                max: self.max_lon,
            });
        }
        Ok(())
    }
}

/// Geographic filter request around one reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_km: Option<f64>,
    pub bbox: Option<BoundingBox>,
}

impl GeoQuery {
    /// Query around a reference point with no filter applied yet.
    pub fn around(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_km: None,
            bbox: None,
        }
    }

    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }
}

/// Resolved per-building predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoPredicate {
    /// Great-circle distance from `center` at most `radius_km`.
    Radius { center: Point<f64>, radius_km: f64 },
    /// Inside the box, edges included.
    Within(BoundingBox),
    /// No geographic constraint.
    Unfiltered,
}

impl GeoPredicate {
    /// Applies the radius-first policy to a query, validating only the
    /// inputs the chosen predicate uses.
    pub fn from_query(query: &GeoQuery) -> Result<Self, GeoQueryError> {
        if let Some(radius_km) = query.radius_km.filter(|radius| *radius != 0.0) {
            if !radius_km.is_finite() || radius_km < 0.0 {
                return Err(GeoQueryError::InvalidRadius(radius_km));
            }
            if !query.latitude.is_finite() || !query.longitude.is_finite() {
                return Err(GeoQueryError::NonFiniteReference {
                    latitude: query.latitude,
                    longitude: query.longitude,
                });
            }
            return Ok(Self::Radius {
                center: Point::new(query.longitude, query.latitude),
                radius_km,
            });
        }

        if let Some(bbox) = query.bbox {
            bbox.validate()?;
            return Ok(Self::Within(bbox));
        }

        Ok(Self::Unfiltered)
    }

    /// Returns whether a building at `location` passes this predicate.
    pub fn matches(&self, location: Point<f64>) -> bool {
        match self {
            Self::Radius { center, radius_km } => distance_between(*center, location) <= *radius_km,
            Self::Within(bbox) => bbox.contains(location),
            Self::Unfiltered => true,
        }
    }
}
