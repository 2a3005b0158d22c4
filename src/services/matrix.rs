//! Pairwise travel matrix construction
//!
//! Populates distance (meters) and duration (minutes) for every ordered pair
//! of points, depot first. Cell fetches run concurrently with a bounded
//! number of in-flight provider calls; the builder returns only after every
//! cell is resolved.

use futures::stream::{self, StreamExt};
use tracing::debug;

use crate::services::directions::LegProvider;
use crate::types::Coordinates;

/// Distance and duration matrices over `[depot, job 1, ..., job N]`.
///
/// Diagonal cells are zero and never consulted downstream. Off-diagonal
/// cells may be asymmetric when a road-network provider fills them; the
/// haversine fallback is symmetric by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelMatrix {
    /// Distance in meters from point i to point j.
    distances: Vec<Vec<u64>>,
    /// Travel time in minutes from point i to point j.
    durations: Vec<Vec<u64>>,
    size: usize,
}

impl TravelMatrix {
    pub fn from_parts(distances: Vec<Vec<u64>>, durations: Vec<Vec<u64>>) -> Self {
        let size = distances.len();
        Self {
            distances,
            durations,
            size,
        }
    }

    /// Number of points (1 + job count).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from point `from` to point `to` in meters.
    pub fn distance_m(&self, from: usize, to: usize) -> u64 {
        self.distances[from][to]
    }

    /// Travel time from point `from` to point `to` in minutes.
    pub fn duration_min(&self, from: usize, to: usize) -> u64 {
        self.durations[from][to]
    }
}

/// Build the full pairwise matrix: one provider call per ordered
/// off-diagonal pair, at most `concurrency` in flight at once.
///
/// Total given a total provider - per-pair failures are already resolved to
/// fallback values inside [`LegProvider::estimate`].
pub async fn build_matrix(
    provider: &LegProvider,
    points: &[Coordinates],
    concurrency: usize,
) -> TravelMatrix {
    let n = points.len();
    let mut distances = vec![vec![0u64; n]; n];
    let mut durations = vec![vec![0u64; n]; n];

    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| (i, j)))
        .collect();

    debug!(
        "Building {}x{} travel matrix ({} provider calls, {} in flight)",
        n,
        n,
        pairs.len(),
        concurrency
    );

    let cells: Vec<(usize, usize, u64, u64)> = stream::iter(pairs.into_iter().map(|(i, j)| async move {
        let estimate = provider.estimate(&points[i], &points[j]).await;
        (i, j, estimate.distance_m, estimate.duration_min)
    }))
    .buffer_unordered(concurrency.max(1))
    .collect()
    .await;

    for (i, j, distance_m, duration_min) in cells {
        distances[i][j] = distance_m;
        durations[i][j] = duration_min;
    }

    TravelMatrix {
        distances,
        durations,
        size: n,
    }
}
