//! # CVRP solver
//!
//! A time-boxed heuristic for the Capacitated Vehicle Routing Problem (CVRP).
//!
//! The solver validates the instance, precomputes a Euclidean distance table,
//! builds an initial solution with a cheapest feasible arc heuristic and then
//! improves it with 2-opt and or-opt moves until no move helps or the time
//! budget runs out. Every solution it returns is feasible: each customer is
//! visited exactly once and no vehicle exceeds its capacity.

pub mod capacity;
pub mod chart;
pub mod config;
pub mod construction;
pub mod distance;
pub mod error;
pub mod local_search;
pub mod problem;
pub mod solution;
pub mod utils;

use log::info;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::distance::DistanceMatrix;
use crate::error::SolverError;
use crate::local_search::LocalSearch;
use crate::problem::Problem;
use crate::solution::Solution;

/// Budget used when the configured time limit cannot be represented as a deadline.
const FALLBACK_TIME_LIMIT: Duration = Duration::from_secs(365 * 24 * 3600);

/// The main structure that orchestrates construction and improvement.
pub struct CvrpSolver {
    pub problem: Problem,
    pub config: Config,
    pub distances: DistanceMatrix,
    pub local_search: LocalSearch,
    pub run_time: Duration,
}

impl CvrpSolver {
    /// Create a solver for the given problem and configuration.
    pub fn new(problem: Problem, config: Config) -> Self {
        let distances = DistanceMatrix::new(&problem);
        let local_search = LocalSearch::new(&config);

        CvrpSolver {
            problem,
            config,
            distances,
            local_search,
            run_time: Duration::from_secs(0),
        }
    }

    /// Run the pre-solve gate and the construction heuristic only.
    pub fn construct(&self) -> Result<Solution, SolverError> {
        self.problem.check_feasibility()?;
        construction::construct(&self.problem, &self.distances)
    }

    /// Solve the instance within the configured budget.
    pub fn run(&mut self) -> Result<Solution, SolverError> {
        let start_time = Instant::now();

        let mut solution = self.construct()?;
        info!(
            "Constructed initial solution with distance {:.2} in {:?}",
            solution.distance,
            start_time.elapsed()
        );

        let improvement_start = Instant::now();
        let deadline = improvement_start
            .checked_add(self.config.time_limit)
            .unwrap_or(improvement_start + FALLBACK_TIME_LIMIT);
        let outcome = self
            .local_search
            .run(&mut solution, &self.problem, &self.distances, deadline);

        let mut solution = Solution::extract(
            solution.routes,
            &self.problem,
            &self.distances,
            outcome.status,
        );
        self.run_time = start_time.elapsed();
        solution.iterations = outcome.iterations;
        solution.run_time = self.run_time;

        Ok(solution)
    }
}

/// Solve `problem` with `config` in one call.
pub fn solve(problem: Problem, config: Config) -> Result<Solution, SolverError> {
    CvrpSolver::new(problem, config).run()
}
