//! Route result types

use serde::{Deserialize, Serialize};

/// Summary record for one optimized route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: i64,
    pub vehicle_id: i64,
    /// Total travel distance in kilometers, rounded to 2 decimals.
    pub distance_km: f64,
    /// Total travel + service time in whole minutes.
    pub duration_min: i64,
    /// Quality signal in (0, 1]: `1 / (1 + distance_km)`, rounded to
    /// 2 decimals. 1.0 means zero travel distance.
    pub score: f64,
}

/// One scheduled stop of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStop {
    pub route_id: i64,
    /// 1-based position in the visiting order.
    pub seq: i64,
    pub job_id: i64,
    /// Timestamp after travel and service at this stop, second precision.
    /// Rendered with a `Z` suffix although the source clock is naive local
    /// time - kept as-is for wire compatibility with existing consumers.
    pub eta_ts: String,
    /// Estimated service time at this stop in minutes.
    pub etc_min: i64,
    /// Reserved - always false in the current scope.
    pub dump_visit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_serializes_snake_case() {
        let route = Route {
            id: 9001,
            vehicle_id: 1,
            distance_km: 1.42,
            duration_min: 28,
            score: 0.41,
        };
        let json = serde_json::to_string(&route).unwrap();
        assert!(json.contains("\"vehicle_id\":1"));
        assert!(json.contains("\"distance_km\":1.42"));
        assert!(json.contains("\"duration_min\":28"));
    }

    #[test]
    fn test_route_stop_roundtrip() {
        let stop = RouteStop {
            route_id: 9001,
            seq: 1,
            job_id: 101,
            eta_ts: "2025-10-01T09:28:00Z".to_string(),
            etc_min: 10,
            dump_visit: false,
        };
        let json = serde_json::to_string(&stop).unwrap();
        let back: RouteStop = serde_json::from_str(&json).unwrap();
        assert_eq!(stop, back);
        assert!(json.contains("\"dump_visit\":false"));
    }
}
