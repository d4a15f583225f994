//! Building with a postal address and geographic position.

use geo::Point;
use serde::{Deserialize, Serialize};

/// Stable identifier for one building.
pub type BuildingId = i64;

/// A physical building organizations are situated in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub address: String,
    /// Degrees, positive north.
    pub latitude: f64,
    /// Degrees, positive east.
    pub longitude: f64,
}

impl Building {
    /// Position as a `geo` point (`x` = longitude, `y` = latitude).
    pub fn location(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}
