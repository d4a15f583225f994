//! Haversine great-circle distance.

use geo::Point;

/// Mean Earth radius used for all catalog distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometres between two points given in degrees.
///
/// Symmetric in its two points and zero for identical points.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        lat1.to_radians(),
        lon1.to_radians(),
        lat2.to_radians(),
        lon2.to_radians(),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points.
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// [`distance_km`] over `geo` points (`x` = longitude, `y` = latitude).
pub fn distance_between(a: Point<f64>, b: Point<f64>) -> f64 {
    distance_km(a.y(), a.x(), b.y(), b.x())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_SQUARE: (f64, f64) = (55.7558, 37.6176);
    const NEARBY: (f64, f64) = (55.7600, 37.6200);

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(
            distance_km(RED_SQUARE.0, RED_SQUARE.1, RED_SQUARE.0, RED_SQUARE.1),
            0.0
        );
    }

    #[test]
    fn distance_is_symmetric() {
        let forward = distance_km(RED_SQUARE.0, RED_SQUARE.1, NEARBY.0, NEARBY.1);
        let backward = distance_km(NEARBY.0, NEARBY.1, RED_SQUARE.0, RED_SQUARE.1);
        assert!((forward - backward).abs() < 1e-12);
    }

    #[test]
    fn nearby_points_are_about_half_a_kilometre_apart() {
        let km = distance_km(RED_SQUARE.0, RED_SQUARE.1, NEARBY.0, NEARBY.1);
        assert!(km > 0.45 && km < 0.55, "unexpected distance {km}");
    }

    #[test]
    fn one_degree_of_latitude_matches_arc_length() {
        let km = distance_km(0.0, 0.0, 1.0, 0.0);
        let expected = EARTH_RADIUS_KM * 1.0_f64.to_radians();
        assert!((km - expected).abs() < 1e-9);
    }

    #[test]
    fn distance_grows_with_angular_separation() {
        let mut previous = 0.0;
        for step in 1..=18 {
            let km = distance_km(0.0, 0.0, 0.0, f64::from(step) * 10.0);
            assert!(km > previous, "distance must increase at step {step}");
            previous = km;
        }
    }

    #[test]
    fn antipodal_points_are_half_the_circumference() {
        let km = distance_km(0.0, 0.0, 0.0, 180.0);
        assert!((km - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn point_wrapper_uses_lon_lat_order() {
        let a = Point::new(RED_SQUARE.1, RED_SQUARE.0);
        let b = Point::new(NEARBY.1, NEARBY.0);
        assert_eq!(
            distance_between(a, b),
            distance_km(RED_SQUARE.0, RED_SQUARE.1, NEARBY.0, NEARBY.1)
        );
    }
}
