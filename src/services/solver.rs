//! Tour solver: cheapest-arc construction plus guided local search
//!
//! Single-vehicle tour over the travel matrix: starts and ends at the depot
//! (node 0) and visits every job node exactly once. Construction is
//! deterministic; the improvement phase runs against a wall-clock deadline
//! and never returns a tour worse than the constructed one.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::services::matrix::TravelMatrix;

/// Scaling of guided-local-search penalties relative to tour cost.
const PENALTY_WEIGHT: f64 = 0.3;

/// A visiting order over job nodes (matrix indices 1..n, depot excluded).
pub type Tour = Vec<usize>;

/// Total tour distance in meters, including the return leg to the depot:
/// `0 -> tour[0] -> ... -> tour[last] -> 0`.
pub fn tour_cost(tour: &[usize], matrix: &TravelMatrix) -> u64 {
    let mut cost = 0;
    let mut prev = 0;
    for &node in tour {
        cost += matrix.distance_m(prev, node);
        prev = node;
    }
    if !tour.is_empty() {
        cost += matrix.distance_m(prev, 0);
    }
    cost
}

/// A pluggable construct/improve strategy pair.
pub trait TourStrategy {
    /// Deterministic initial tour.
    fn construct(&self, matrix: &TravelMatrix) -> Tour;

    /// Refine `tour` until `deadline`. Must return the best tour found so
    /// far, never one worse than the input.
    fn improve(&self, tour: Tour, matrix: &TravelMatrix, deadline: Instant) -> Tour;
}

/// Guided local search over 2-opt and relocate moves.
///
/// Escapes local optima by penalizing the highest-utility edge of the
/// current tour and descending on a distance + penalty augmented cost.
/// The best tour is always tracked by true distance.
pub struct GuidedLocalSearch;

impl TourStrategy for GuidedLocalSearch {
    fn construct(&self, matrix: &TravelMatrix) -> Tour {
        let n = matrix.size();
        if n <= 1 {
            return Vec::new();
        }

        let mut tour = Vec::with_capacity(n - 1);
        let mut visited = vec![false; n];
        let mut current = 0;

        while tour.len() < n - 1 {
            let mut best: Option<usize> = None;
            let mut best_cost = u64::MAX;
            for node in 1..n {
                if visited[node] {
                    continue;
                }
                let cost = matrix.distance_m(current, node);
                // Strict < keeps the lowest-index node on ties.
                if cost < best_cost {
                    best_cost = cost;
                    best = Some(node);
                }
            }
            match best {
                Some(node) => {
                    visited[node] = true;
                    tour.push(node);
                    current = node;
                }
                None => break,
            }
        }

        tour
    }

    fn improve(&self, tour: Tour, matrix: &TravelMatrix, deadline: Instant) -> Tour {
        if tour.len() < 2 {
            return tour;
        }

        let mut best = tour.clone();
        let mut best_cost = tour_cost(&best, matrix);

        let n = matrix.size();
        let mut penalties = vec![vec![0u64; n]; n];
        // Penalty unit scaled to the instance so the augmented term stays
        // comparable to real edge costs.
        let lambda = ((best_cost as f64 * PENALTY_WEIGHT) / (tour.len() as f64 + 1.0)) as u64;
        let lambda = lambda.max(1);

        let mut current = tour;

        loop {
            let moved = descend(&mut current, matrix, &penalties, lambda, deadline);

            if moved {
                let cost = tour_cost(&current, matrix);
                if cost < best_cost {
                    best_cost = cost;
                    best = current.clone();
                }
            }

            if Instant::now() >= deadline {
                return best;
            }

            // Local optimum on the augmented cost - penalize the most useful
            // edge of the current tour to push the search elsewhere.
            penalize_worst_edge(&current, matrix, &mut penalties);
        }
    }
}

/// First-improvement descent on the penalty-augmented cost.
///
/// Applies 2-opt segment reversals and single-node relocations until no
/// move improves or the deadline passes. Returns whether any move was
/// applied.
fn descend(
    tour: &mut Tour,
    matrix: &TravelMatrix,
    penalties: &[Vec<u64>],
    lambda: u64,
    deadline: Instant,
) -> bool {
    let n = tour.len();
    let mut any_applied = false;

    loop {
        let current = augmented_cost(tour, matrix, penalties, lambda);
        let mut applied = false;

        // 2-opt: reverse tour[i..=j]. Candidates are re-costed in full since
        // the matrix may be asymmetric and a reversal changes inner legs.
        'two_opt: for i in 0..n.saturating_sub(1) {
            for j in i + 1..n {
                if Instant::now() >= deadline {
                    return any_applied;
                }
                let mut candidate = tour.clone();
                candidate[i..=j].reverse();
                if augmented_cost(&candidate, matrix, penalties, lambda) < current {
                    *tour = candidate;
                    applied = true;
                    any_applied = true;
                    break 'two_opt;
                }
            }
        }

        if !applied {
            // Relocate: move a single node to another position.
            'relocate: for i in 0..n {
                for position in 0..n {
                    if position == i {
                        continue;
                    }
                    if Instant::now() >= deadline {
                        return any_applied;
                    }
                    let mut candidate = tour.clone();
                    let node = candidate.remove(i);
                    candidate.insert(position, node);
                    if augmented_cost(&candidate, matrix, penalties, lambda) < current {
                        *tour = candidate;
                        applied = true;
                        any_applied = true;
                        break 'relocate;
                    }
                }
            }
        }

        if !applied {
            return any_applied;
        }
    }
}

/// Tour distance plus `lambda` per accumulated edge penalty.
fn augmented_cost(tour: &[usize], matrix: &TravelMatrix, penalties: &[Vec<u64>], lambda: u64) -> u64 {
    let mut cost = 0;
    let mut prev = 0;
    for &node in tour {
        cost += matrix.distance_m(prev, node) + lambda * penalties[prev][node];
        prev = node;
    }
    if !tour.is_empty() {
        cost += matrix.distance_m(prev, 0) + lambda * penalties[prev][0];
    }
    cost
}

/// Penalize the tour edge with the highest utility
/// `distance / (1 + penalties)`; the first such edge wins on ties.
fn penalize_worst_edge(tour: &[usize], matrix: &TravelMatrix, penalties: &mut [Vec<u64>]) {
    let mut best_edge = None;
    let mut best_utility = f64::MIN;

    let mut prev = 0usize;
    for &node in tour.iter().chain(std::iter::once(&0usize)) {
        let utility = matrix.distance_m(prev, node) as f64 / (1.0 + penalties[prev][node] as f64);
        if utility > best_utility {
            best_utility = utility;
            best_edge = Some((prev, node));
        }
        prev = node;
    }

    if let Some((from, to)) = best_edge {
        penalties[from][to] += 1;
    }
}

/// Solve the visiting order for the given matrix within `time_budget`.
///
/// Falls back to the natural input order `[1, 2, ..]` when the search cannot
/// produce a complete tour, so the pipeline always yields some route for a
/// valid job set. The improvement result is discarded if it would ever be
/// worse than the constructed tour.
pub fn solve_tour(matrix: &TravelMatrix, time_budget: Duration) -> Tour {
    let n = matrix.size();
    if n <= 1 {
        return Vec::new();
    }

    let strategy = GuidedLocalSearch;
    let deadline = Instant::now() + time_budget;

    let constructed = strategy.construct(matrix);
    if constructed.len() != n - 1 {
        warn!(
            "Construction produced {} of {} stops, falling back to natural order",
            constructed.len(),
            n - 1
        );
        return (1..n).collect();
    }
    let construction_cost = tour_cost(&constructed, matrix);

    let improved = strategy.improve(constructed.clone(), matrix, deadline);
    let improved_cost = tour_cost(&improved, matrix);

    // Monotonic improvement guard.
    if improved_cost > construction_cost {
        return constructed;
    }

    debug!(
        "Tour solved: {} stops, {} m constructed, {} m improved",
        improved.len(),
        construction_cost,
        improved_cost
    );
    improved
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUDGET: Duration = Duration::from_millis(50);

    fn uniform_matrix(size: usize, dist_m: u64) -> TravelMatrix {
        let mut distances = vec![vec![0u64; size]; size];
        let mut durations = vec![vec![0u64; size]; size];
        for i in 0..size {
            for j in 0..size {
                if i != j {
                    distances[i][j] = dist_m;
                    durations[i][j] = (dist_m / 75).max(1);
                }
            }
        }
        TravelMatrix::from_parts(distances, durations)
    }

    fn matrix_from_distances(distances: Vec<Vec<u64>>) -> TravelMatrix {
        let durations = distances
            .iter()
            .map(|row| row.iter().map(|&d| if d == 0 { 0 } else { (d / 75).max(1) }).collect())
            .collect();
        TravelMatrix::from_parts(distances, durations)
    }

    /// Deterministic pseudo-random asymmetric matrix for stress tests.
    fn scrambled_matrix(size: usize) -> TravelMatrix {
        let mut distances = vec![vec![0u64; size]; size];
        for i in 0..size {
            for j in 0..size {
                if i != j {
                    distances[i][j] = (((i * 31 + j * 17) % 97 + 1) * 100) as u64;
                }
            }
        }
        matrix_from_distances(distances)
    }

    fn is_permutation_of_jobs(tour: &[usize], n: usize) -> bool {
        let mut seen = vec![false; n];
        if tour.len() != n - 1 {
            return false;
        }
        for &node in tour {
            if node == 0 || node >= n || seen[node] {
                return false;
            }
            seen[node] = true;
        }
        true
    }

    #[test]
    fn test_empty_matrix_yields_empty_tour() {
        assert!(solve_tour(&uniform_matrix(0, 0), BUDGET).is_empty());
        assert!(solve_tour(&uniform_matrix(1, 0), BUDGET).is_empty());
    }

    #[test]
    fn test_single_job() {
        let tour = solve_tour(&uniform_matrix(2, 5_000), BUDGET);
        assert_eq!(tour, vec![1]);
    }

    #[test]
    fn test_tour_cost_includes_return_leg() {
        let matrix = uniform_matrix(3, 5_000);
        // depot -> 1 -> 2 -> depot
        assert_eq!(tour_cost(&[1, 2], &matrix), 15_000);
        assert_eq!(tour_cost(&[], &matrix), 0);
    }

    #[test]
    fn test_construct_breaks_ties_by_lowest_index() {
        let strategy = GuidedLocalSearch;
        let tour = strategy.construct(&uniform_matrix(4, 5_000));
        assert_eq!(tour, vec![1, 2, 3]);
    }

    #[test]
    fn test_construct_picks_cheapest_arc() {
        // Points on a line: depot at 0 m, node 1 at 30 km, node 2 at 10 km,
        // node 3 at 20 km.
        let positions = [0i64, 30_000, 10_000, 20_000];
        let mut distances = vec![vec![0u64; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                if i != j {
                    distances[i][j] = positions[i].abs_diff(positions[j]);
                }
            }
        }
        let matrix = matrix_from_distances(distances);

        let strategy = GuidedLocalSearch;
        assert_eq!(strategy.construct(&matrix), vec![2, 3, 1]);
    }

    #[test]
    fn test_improvement_escapes_greedy_trap() {
        // Greedy yields [1, 2, 3] at cost 13_000; the optimum [2, 1, 3]
        // costs 12_000 and needs one 2-opt reversal.
        let distances = vec![
            vec![0, 1_000, 5_000, 1_000],
            vec![1_000, 0, 1_000, 5_000],
            vec![5_000, 1_000, 0, 10_000],
            vec![1_000, 5_000, 10_000, 0],
        ];
        let matrix = matrix_from_distances(distances);

        let strategy = GuidedLocalSearch;
        let constructed = strategy.construct(&matrix);
        assert_eq!(tour_cost(&constructed, &matrix), 13_000);

        let tour = solve_tour(&matrix, BUDGET);
        assert_eq!(tour_cost(&tour, &matrix), 12_000);
        assert_eq!(tour, vec![2, 1, 3]);
    }

    #[test]
    fn test_improvement_is_monotonic() {
        let matrix = scrambled_matrix(12);
        let strategy = GuidedLocalSearch;

        let constructed = strategy.construct(&matrix);
        let construction_cost = tour_cost(&constructed, &matrix);

        let tour = solve_tour(&matrix, BUDGET);
        assert!(tour_cost(&tour, &matrix) <= construction_cost);
        assert!(is_permutation_of_jobs(&tour, 12));
    }

    #[test]
    fn test_deadline_is_respected() {
        let matrix = scrambled_matrix(25);
        let budget = Duration::from_millis(100);

        let started = Instant::now();
        let tour = solve_tour(&matrix, budget);
        let elapsed = started.elapsed();

        assert!(
            elapsed < budget + Duration::from_millis(500),
            "solver overran its budget: {:?}",
            elapsed
        );
        assert!(is_permutation_of_jobs(&tour, 25));
    }

    #[test]
    fn test_solver_is_deterministic_on_small_instances() {
        // Small enough that the optimum is found well inside the budget on
        // every run.
        let matrix = scrambled_matrix(5);
        let first = solve_tour(&matrix, BUDGET);
        let second = solve_tour(&matrix, BUDGET);
        assert_eq!(tour_cost(&first, &matrix), tour_cost(&second, &matrix));
    }
}
