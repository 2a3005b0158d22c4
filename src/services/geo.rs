//! Geodesic distance estimation
//!
//! Fallback metric used when no road-network directions are available.
//! Distances are great-circle; travel time assumes walking speed.

use crate::types::Coordinates;

/// Earth radius in kilometers
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Fallback travel speed: walking at 4.5 km/h = 75 m/min.
const WALKING_METERS_PER_MINUTE: u64 = 75;

/// Great-circle distance between two points in whole meters (truncated).
pub fn haversine_meters(from: &Coordinates, to: &Coordinates) -> u64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lon = (to.lng - from.lng).to_radians();

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    (EARTH_RADIUS_KM * c * 1000.0) as u64
}

/// Walking-speed travel time for a leg, never below one minute.
///
/// The one-minute floor keeps very close points from producing
/// zero-duration legs that would break ETA monotonicity downstream.
pub fn fallback_minutes(distance_m: u64) -> u64 {
    (distance_m / WALKING_METERS_PER_MINUTE).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point_is_zero() {
        let point = Coordinates { lat: 37.5, lng: 127.0 };
        assert_eq!(haversine_meters(&point, &point), 0);
    }

    #[test]
    fn test_haversine_prague_brno() {
        let prague = Coordinates { lat: 50.0755, lng: 14.4378 };
        let brno = Coordinates { lat: 49.1951, lng: 16.6068 };

        let distance = haversine_meters(&prague, &brno);

        // Prague to Brno is approximately 185 km
        assert!(distance > 180_000 && distance < 190_000, "got {} m", distance);
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = Coordinates { lat: 37.50, lng: 127.00 };
        let b = Coordinates { lat: 37.51, lng: 127.01 };

        assert_eq!(haversine_meters(&a, &b), haversine_meters(&b, &a));
    }

    #[test]
    fn test_haversine_short_leg() {
        // ~0.01 deg in both axes near Seoul is roughly 1.4 km
        let a = Coordinates { lat: 37.50, lng: 127.00 };
        let b = Coordinates { lat: 37.51, lng: 127.01 };

        let distance = haversine_meters(&a, &b);
        assert!(distance > 1_300 && distance < 1_500, "got {} m", distance);
    }

    #[test]
    fn test_fallback_minutes_floors_division() {
        // 1419 m at 75 m/min = 18.92 -> 18 min
        assert_eq!(fallback_minutes(1419), 18);
        assert_eq!(fallback_minutes(750), 10);
    }

    #[test]
    fn test_fallback_minutes_never_below_one() {
        assert_eq!(fallback_minutes(0), 1);
        assert_eq!(fallback_minutes(74), 1);
        assert_eq!(fallback_minutes(75), 1);
        assert_eq!(fallback_minutes(150), 2);
    }
}
