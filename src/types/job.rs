//! Job entity

use serde::{Deserialize, Serialize};

use super::Coordinates;

/// A geolocated service job for one operating day.
///
/// Jobs are immutable inputs to the optimizer. `priority` and the
/// `tw_start`/`tw_end` time-window fields are accepted on the wire but not
/// enforced by the current solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// On-site service duration in minutes.
    pub service_min: i64,
    pub priority: i64,
    #[serde(default)]
    pub tw_start: Option<String>,
    #[serde(default)]
    pub tw_end: Option<String>,
    /// Business date (YYYY-MM-DD).
    pub date: String,
    pub status: String,
}

impl Job {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lng: self.lng,
        }
    }
}
