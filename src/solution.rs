//! Solution representation for the CVRP.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::capacity::CapacityTracker;
use crate::distance::DistanceMatrix;
use crate::error::SolverError;
use crate::problem::{Problem, DEPOT};

/// How a solver run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    /// Proven optimal. Reserved for an exact solver; never produced here.
    Optimal,
    /// Local search ran out of improving moves.
    Converged,
    /// The time or iteration budget ran out before convergence.
    TimedOut,
    /// The instance was rejected before solving.
    Infeasible,
}

impl SolveStatus {
    /// Numeric code written to the output file.
    pub fn code(&self) -> u8 {
        match self {
            SolveStatus::Optimal => 0,
            SolveStatus::Converged => 1,
            SolveStatus::TimedOut => 2,
            SolveStatus::Infeasible => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Converged => "CONVERGED",
            SolveStatus::TimedOut => "TIMED_OUT",
            SolveStatus::Infeasible => "INFEASIBLE",
        }
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Represents the route driven by one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// The vehicle serving this route
    pub vehicle: usize,
    /// The sequence of customer indices (excluding the depot)
    pub customers: Vec<usize>,
    /// The total load of the route
    pub load: u64,
    /// The total distance of the route, depot legs included
    pub distance: f64,
}

impl Route {
    /// Create a new, empty route for `vehicle`.
    pub fn new(vehicle: usize) -> Self {
        Route {
            vehicle,
            customers: Vec::new(),
            load: 0,
            distance: 0.0,
        }
    }

    /// Create a route visiting `customers` in order, with load and distance filled in.
    pub fn with_customers(
        vehicle: usize,
        customers: Vec<usize>,
        problem: &Problem,
        distances: &DistanceMatrix,
    ) -> Self {
        let mut route = Route {
            vehicle,
            customers,
            load: 0,
            distance: 0.0,
        };
        route.evaluate(problem, distances);
        route
    }

    /// The last location visited so far (the depot for an empty route).
    pub fn end(&self) -> usize {
        self.customers.last().copied().unwrap_or(DEPOT)
    }

    /// The full location sequence, starting and ending at the depot.
    pub fn path(&self) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.customers.len() + 2);
        path.push(DEPOT);
        path.extend_from_slice(&self.customers);
        path.push(DEPOT);
        path
    }

    /// Recompute load and distance from the customer sequence.
    pub fn evaluate(&mut self, problem: &Problem, distances: &DistanceMatrix) {
        self.load = CapacityTracker::load(problem, &self.customers);
        self.distance = if self.customers.is_empty() {
            0.0
        } else {
            distances.route_distance(&self.path())
        };
    }

    /// Check if the route is empty.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Check if the route exceeds the vehicle capacity.
    pub fn exceeds_capacity(&self, capacity: u64) -> bool {
        self.load > capacity
    }
}

/// A complete, reportable solution: one route per vehicle.
#[derive(Clone, Serialize, Deserialize)]
pub struct Solution {
    /// One route per vehicle, indexed by vehicle
    pub routes: Vec<Route>,
    /// The total distance over all routes
    pub distance: f64,
    /// How the run that produced this solution ended
    pub status: SolveStatus,
    /// Accepted local search moves
    pub iterations: u64,
    /// Wall-clock time spent solving
    pub run_time: Duration,
}

impl Solution {
    /// Freeze a set of routes into a reportable solution.
    ///
    /// Loads, route distances and the total are recomputed from the customer
    /// sequences so the figures always agree with the distance table.
    pub fn extract(
        mut routes: Vec<Route>,
        problem: &Problem,
        distances: &DistanceMatrix,
        status: SolveStatus,
    ) -> Self {
        routes.sort_by_key(|route| route.vehicle);
        for route in &mut routes {
            route.evaluate(problem, distances);
        }
        let distance = routes.iter().map(|route| route.distance).sum();

        Solution {
            routes,
            distance,
            status,
            iterations: 0,
            run_time: Duration::ZERO,
        }
    }

    /// Recompute the total distance from the route distances.
    pub fn update_distance(&mut self) {
        self.distance = self.routes.iter().map(|route| route.distance).sum();
    }

    /// Get the number of routes that actually visit customers.
    pub fn get_used_route_count(&self) -> usize {
        self.routes.iter().filter(|route| !route.is_empty()).count()
    }

    /// Check coverage, route shape, capacity and distance consistency.
    pub fn validate(&self, problem: &Problem, distances: &DistanceMatrix) -> Result<(), SolverError> {
        if self.routes.len() != problem.vehicle_count() {
            return Err(SolverError::InvalidSolution(format!(
                "{} routes for {} vehicles",
                self.routes.len(),
                problem.vehicle_count()
            )));
        }

        let mut visits = vec![0usize; problem.location_count()];
        let mut total = 0.0;

        for (vehicle, route) in self.routes.iter().enumerate() {
            if route.vehicle != vehicle {
                return Err(SolverError::InvalidSolution(format!(
                    "route at position {} belongs to vehicle {}",
                    vehicle, route.vehicle
                )));
            }

            for &customer in &route.customers {
                if customer == DEPOT || customer >= problem.location_count() {
                    return Err(SolverError::InvalidSolution(format!(
                        "vehicle {} visits invalid location {}",
                        vehicle, customer
                    )));
                }
                visits[customer] += 1;
            }

            // The depot only appears as the implicit first and last stop.
            let path = route.path();

            let load = CapacityTracker::load(problem, &route.customers);
            if load != route.load || route.exceeds_capacity(problem.capacity(vehicle)) {
                return Err(SolverError::InvalidSolution(format!(
                    "vehicle {} carries {} (recorded {}) with capacity {}",
                    vehicle,
                    load,
                    route.load,
                    problem.capacity(vehicle)
                )));
            }

            let distance = distances.route_distance(&path);
            if (distance - route.distance).abs() > 1e-6 {
                return Err(SolverError::InvalidSolution(format!(
                    "vehicle {} records distance {} but travels {}",
                    vehicle, route.distance, distance
                )));
            }
            total += distance;
        }

        if let Some(customer) = (1..problem.location_count()).find(|&c| visits[c] != 1) {
            return Err(SolverError::InvalidSolution(format!(
                "customer {} is visited {} times",
                customer, visits[customer]
            )));
        }

        if (total - self.distance).abs() > 1e-6 {
            return Err(SolverError::InvalidSolution(format!(
                "total distance {} does not match route sum {}",
                self.distance, total
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Distance: {:.2}", self.distance)?;
        writeln!(f, "  Status: {}", self.status)?;
        writeln!(f, "  Iterations: {}", self.iterations)?;
        writeln!(f, "  Routes: {}", self.routes.len())?;

        for route in &self.routes {
            writeln!(
                f,
                "  Vehicle {}: {:?} (Load: {}, Distance: {:.2})",
                route.vehicle,
                route.path(),
                route.load,
                route.distance
            )?;
        }

        Ok(())
    }
}
