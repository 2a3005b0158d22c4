//! Schedule materialization: visiting order to timestamped stops
//!
//! Walks the solved order from the depot, accumulating travel time (matrix
//! minutes) and service time per job from a fixed 09:00 day start on the
//! business date. ETAs are rendered from the naive local clock with a `Z`
//! suffix and no timezone conversion - a wire-compat artifact preserved
//! deliberately.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::services::matrix::TravelMatrix;
use crate::types::{Job, Route, RouteStop, Vehicle};

/// Fixed identifier stamped on emitted routes.
pub const ROUTE_ID: i64 = 9001;

/// Route work starts at 09:00 local wall-clock on the business date.
const DAY_START_HOUR: u32 = 9;

const ETA_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Convert a visiting order into a `Route` summary and its ordered stops.
///
/// `order` holds matrix node indices (1..=N); job for node `i` is
/// `jobs[i - 1]`. Totals cover travel plus service for the visited legs;
/// the return to the depot is not part of the schedule.
pub fn materialize(
    order: &[usize],
    matrix: &TravelMatrix,
    jobs: &[Job],
    vehicle: &Vehicle,
    date: &str,
) -> Result<(Route, Vec<RouteStop>)> {
    let business_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .with_context(|| format!("Invalid business date '{}'", date))?;
    let mut clock: NaiveDateTime = business_date
        .and_hms_opt(DAY_START_HOUR, 0, 0)
        .context("Invalid day start")?;

    let mut total_distance_m: u64 = 0;
    let mut total_minutes: i64 = 0;
    let mut stops = Vec::with_capacity(order.len());
    let mut prev = 0usize;

    for (position, &node) in order.iter().enumerate() {
        let job = jobs
            .get(node - 1)
            .with_context(|| format!("Tour node {} has no matching job", node))?;
        let travel_min = matrix.duration_min(prev, node) as i64;

        clock += Duration::minutes(travel_min + job.service_min);

        total_distance_m += matrix.distance_m(prev, node);
        total_minutes += travel_min + job.service_min;

        stops.push(RouteStop {
            route_id: ROUTE_ID,
            seq: position as i64 + 1,
            job_id: job.id,
            eta_ts: clock.format(ETA_FORMAT).to_string(),
            etc_min: job.service_min,
            dump_visit: false,
        });

        prev = node;
    }

    let distance_km = total_distance_m as f64 / 1000.0;
    let route = Route {
        id: ROUTE_ID,
        vehicle_id: vehicle.id,
        distance_km: round2(distance_km),
        duration_min: total_minutes,
        score: round2(1.0 / (1.0 + distance_km)),
    };

    Ok((route, stops))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
