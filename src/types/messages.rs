//! Optimize request/response wire types
//!
//! These are the JSON contract consumed by the gateway. Field names stay
//! snake_case to match the reference wire format.

use serde::{Deserialize, Serialize};

use super::{Job, Route, RouteStop, Vehicle};

/// Inbound optimize request for one operating day.
///
/// Only `vehicles[0]` is planned; additional vehicles are ignored with a
/// warning (single-vehicle solver, a documented limitation).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeRequest {
    /// Business date (YYYY-MM-DD).
    pub date: String,
    pub area: String,
    pub vehicles: Vec<Vehicle>,
    pub jobs: Vec<Job>,
}

/// Optimize response: one route plus its ordered stops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeResponse {
    pub routes: Vec<Route>,
    pub route_stops: Vec<RouteStop>,
}
