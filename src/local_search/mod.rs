//! Time-boxed local search over a feasible solution.

pub mod or_opt;
pub mod two_opt;
pub mod utils;

use log::{debug, info};
use std::time::Instant;

use crate::config::{clamp_threshold, Config};
use crate::distance::DistanceMatrix;
use crate::problem::Problem;
use crate::solution::{Solution, SolveStatus};

/// Summary of one improvement phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalSearchOutcome {
    /// Converged at a local optimum, or timed out
    pub status: SolveStatus,
    /// Number of accepted moves
    pub iterations: u64,
    pub initial_distance: f64,
    pub final_distance: f64,
}

/// Improves a solution with 2-opt and or-opt moves until no move helps or the
/// budget runs out.
///
/// Only strictly improving, capacity-feasible moves are accepted, so the
/// solution stays feasible and its distance never increases. The budget is
/// checked between moves; a move is never left half applied.
pub struct LocalSearch {
    pub max_chain_length: usize,
    pub improvement_threshold: f64,
    pub max_iterations: Option<u64>,
    /// Accepted moves in the current run
    iterations: u64,
}

impl LocalSearch {
    /// Create a new local search instance.
    pub fn new(config: &Config) -> Self {
        LocalSearch {
            max_chain_length: config.max_chain_length.max(1),
            improvement_threshold: clamp_threshold(config.improvement_threshold),
            max_iterations: config.max_iterations,
            iterations: 0,
        }
    }

    /// Run local search on `solution` until convergence or `deadline`.
    pub fn run(
        &mut self,
        solution: &mut Solution,
        problem: &Problem,
        distances: &DistanceMatrix,
        deadline: Instant,
    ) -> LocalSearchOutcome {
        self.iterations = 0;
        let initial_distance = solution.distance;

        let status = loop {
            if Instant::now() >= deadline {
                break SolveStatus::TimedOut;
            }
            if matches!(self.max_iterations, Some(limit) if self.iterations >= limit) {
                break SolveStatus::TimedOut;
            }

            let improved = self.two_opt_neighborhood(solution, problem, distances)
                || self.or_opt_neighborhood(solution, problem, distances);
            if !improved {
                break SolveStatus::Converged;
            }

            self.iterations += 1;
            debug_assert!(solution.validate(problem, distances).is_ok());
            debug!(
                "Iteration {}: distance {:.4}",
                self.iterations, solution.distance
            );
        };

        solution.status = status;
        solution.iterations = self.iterations;

        info!(
            "Local search {} after {} moves: {:.2} -> {:.2}",
            status, self.iterations, initial_distance, solution.distance
        );

        LocalSearchOutcome {
            status,
            iterations: self.iterations,
            initial_distance,
            final_distance: solution.distance,
        }
    }

    /// Accepted moves in the last run.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    #[inline]
    pub(crate) fn is_improving(&self, delta: f64) -> bool {
        delta < -clamp_threshold(self.improvement_threshold)
    }
}
