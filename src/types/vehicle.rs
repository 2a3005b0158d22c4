//! Vehicle entity

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// Vehicle - the unit that drives a route, anchored at its depot.
///
/// The optimizer is single-vehicle: only the first vehicle of a request is
/// planned. `capacity` is accepted on the wire but not enforced (no load
/// model in the current solver).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    #[serde(rename = "type", default = "default_vehicle_type")]
    pub vehicle_type: String,
    #[serde(default)]
    pub capacity: Option<i64>,
    pub depot_lat: f64,
    pub depot_lng: f64,
}

fn default_vehicle_type() -> String {
    "WALK".to_string()
}

impl Vehicle {
    /// Depot location - route start/end, matrix node 0.
    pub fn depot(&self) -> Coordinates {
        Coordinates {
            lat: self.depot_lat,
            lng: self.depot_lng,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_deserialize_full() {
        let json = r#"{
            "id": 1,
            "type": "TRUCK",
            "capacity": 500,
            "depot_lat": 37.50,
            "depot_lng": 127.00
        }"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();

        assert_eq!(vehicle.id, 1);
        assert_eq!(vehicle.vehicle_type, "TRUCK");
        assert_eq!(vehicle.capacity, Some(500));
        assert_eq!(vehicle.depot().lat, 37.50);
        assert_eq!(vehicle.depot().lng, 127.00);
    }

    #[test]
    fn test_vehicle_type_defaults_to_walk() {
        let json = r#"{"id": 2, "depot_lat": 37.5, "depot_lng": 127.0}"#;
        let vehicle: Vehicle = serde_json::from_str(json).unwrap();

        assert_eq!(vehicle.vehicle_type, "WALK");
        assert_eq!(vehicle.capacity, None);
    }

    #[test]
    fn test_vehicle_type_serializes_as_type() {
        let vehicle = Vehicle {
            id: 3,
            vehicle_type: "WALK".to_string(),
            capacity: Some(0),
            depot_lat: 37.5,
            depot_lng: 127.0,
        };
        let json = serde_json::to_string(&vehicle).unwrap();
        assert!(json.contains("\"type\":\"WALK\""));
        assert!(!json.contains("vehicle_type"));
    }
}
