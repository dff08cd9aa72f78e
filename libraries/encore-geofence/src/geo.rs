use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// WGS84 position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle distance between `a` and `b` in meters
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} +/- {tolerance}, got {actual}"
        );
    }

    #[test]
    fn same_point_is_zero() {
        let p = Coordinate::new(37.787974, -122.407437);
        assert_eq!(haversine_distance(p, p), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        // 2 * pi * R / 360
        approx(
            haversine_distance(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0)),
            111_194.93,
            0.01,
        );
    }

    #[test]
    fn known_city_pair() {
        // Paris to London, ~343.5 km on a 6371 km sphere
        let paris = Coordinate::new(48.8566, 2.3522);
        let london = Coordinate::new(51.5074, -0.1278);
        approx(haversine_distance(paris, london), 343_550.0, 500.0);
    }

    #[test]
    fn antipodes_are_half_circumference() {
        approx(
            haversine_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 180.0)),
            std::f64::consts::PI * EARTH_RADIUS_M,
            1e-3,
        );
    }

    proptest! {
        #[test]
        fn symmetric_and_bounded(
            lat1 in -90.0f64..90.0, lon1 in -180.0f64..180.0,
            lat2 in -90.0f64..90.0, lon2 in -180.0f64..180.0,
        ) {
            let a = Coordinate::new(lat1, lon1);
            let b = Coordinate::new(lat2, lon2);
            let ab = haversine_distance(a, b);
            let ba = haversine_distance(b, a);

            prop_assert!(ab >= 0.0);
            prop_assert!(ab <= std::f64::consts::PI * EARTH_RADIUS_M + 1e-6);
            prop_assert!((ab - ba).abs() < 1e-6);
        }
    }
}
