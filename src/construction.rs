//! Cheapest feasible arc construction of an initial solution.

use log::{debug, warn};

use crate::capacity::CapacityTracker;
use crate::distance::DistanceMatrix;
use crate::error::SolverError;
use crate::problem::Problem;
use crate::solution::{Route, Solution, SolveStatus};

/// Build an initial solution by repeatedly extending some route with the
/// closest customer that still fits.
///
/// Every vehicle starts with an empty route at the depot. In each step all
/// (route end, unassigned customer) pairs that respect capacity are scanned
/// and the shortest arc is taken; ties go to the lowest vehicle index, then
/// the lowest customer index. The result is fully deterministic.
pub fn construct(problem: &Problem, distances: &DistanceMatrix) -> Result<Solution, SolverError> {
    let mut routes: Vec<Route> = (0..problem.vehicle_count()).map(Route::new).collect();
    let mut assigned = vec![false; problem.location_count()];
    let mut remaining = problem.customer_count();

    while remaining > 0 {
        let mut best: Option<(f64, usize, usize)> = None;

        for (vehicle, route) in routes.iter().enumerate() {
            let end = route.end();
            let capacity = problem.capacity(vehicle);

            for customer in 1..problem.location_count() {
                if assigned[customer]
                    || !CapacityTracker::fits(route.load, problem.demand(customer), capacity)
                {
                    continue;
                }

                let arc = distances.distance(end, customer);
                // Strict comparison keeps the earliest vehicle/customer on ties
                if best.map_or(true, |(cost, _, _)| arc < cost) {
                    best = Some((arc, vehicle, customer));
                }
            }
        }

        let Some((arc, vehicle, customer)) = best else {
            let unassigned: Vec<usize> = (1..problem.location_count())
                .filter(|&c| !assigned[c])
                .collect();
            warn!(
                "Construction stuck with {} unassigned customers",
                unassigned.len()
            );
            return Err(SolverError::InfeasibleConstruction { unassigned });
        };

        let route = &mut routes[vehicle];
        route.customers.push(customer);
        route.load += problem.demand(customer);
        assigned[customer] = true;
        remaining -= 1;

        debug!(
            "Appended customer {} to vehicle {} (arc {:.2}, load {})",
            customer, vehicle, arc, route.load
        );
    }

    let solution = Solution::extract(routes, problem, distances, SolveStatus::Converged);
    debug!(
        "Initial solution: distance {:.2}, {} routes in use",
        solution.distance,
        solution.get_used_route_count()
    );

    Ok(solution)
}
