//! End-to-end optimize pipeline
//!
//! request -> travel matrix -> tour solver -> schedule. Preconditions fail
//! fast; everything downstream degrades internally (per-leg fallback,
//! natural-order tour) and never surfaces an error for a structurally valid
//! request with at least one vehicle.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::services::directions::LegProvider;
use crate::services::{matrix, schedule, solver};
use crate::types::{Coordinates, OptimizeRequest, OptimizeResponse};

/// Precondition violations surfaced to the caller.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("at least one vehicle required")]
    NoVehicles,
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] anyhow::Error),
}

/// Compute the visiting route and stop schedule for one operating day.
pub async fn optimize(
    request: &OptimizeRequest,
    provider: &LegProvider,
    config: &Config,
) -> Result<OptimizeResponse, OptimizeError> {
    let vehicle = request.vehicles.first().ok_or(OptimizeError::NoVehicles)?;
    if request.vehicles.len() > 1 {
        warn!(
            "Request has {} vehicles; only vehicle {} is planned (single-vehicle solver)",
            request.vehicles.len(),
            vehicle.id
        );
    }

    info!(
        "Optimizing {} jobs for {} (area {})",
        request.jobs.len(),
        request.date,
        request.area
    );

    // Node 0 is the depot; node i is jobs[i - 1], in request order.
    let mut points: Vec<Coordinates> = Vec::with_capacity(request.jobs.len() + 1);
    points.push(vehicle.depot());
    points.extend(request.jobs.iter().map(|job| job.coordinates()));

    let travel = matrix::build_matrix(provider, &points, config.matrix_concurrency).await;

    let order = solver::solve_tour(&travel, Duration::from_millis(config.solver_time_budget_ms));

    let (route, stops) = schedule::materialize(&order, &travel, &request.jobs, vehicle, &request.date)?;

    debug!(
        "Route {}: {} stops, {} km, {} min, score {}",
        route.id,
        stops.len(),
        route.distance_km,
        route.duration_min,
        route.score
    );

    Ok(OptimizeResponse {
        routes: vec![route],
        route_stops: stops,
    })
}
