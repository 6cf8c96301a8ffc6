//! 2-Opt neighborhood for local search (intra-route).

use crate::distance::DistanceMatrix;
use crate::problem::Problem;
use crate::solution::Solution;

use super::utils::{predecessor, successor};
use super::LocalSearch;

/// Reversal of `customers[i..=j]` in the route of `vehicle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoOptMove {
    pub vehicle: usize,
    pub i: usize,
    pub j: usize,
}

impl LocalSearch {
    /// Apply the first improving 2-opt move, scanning routes in vehicle order.
    ///
    /// Returns `true` if a move was applied. Capacity is unaffected since the
    /// route keeps the same customers.
    pub fn two_opt_neighborhood(
        &mut self,
        solution: &mut Solution,
        problem: &Problem,
        distances: &DistanceMatrix,
    ) -> bool {
        match self.find_two_opt(solution, distances) {
            Some(mv) => {
                self.apply_two_opt(solution, problem, distances, mv);
                true
            }
            None => false,
        }
    }

    fn find_two_opt(&self, solution: &Solution, distances: &DistanceMatrix) -> Option<TwoOptMove> {
        for route in &solution.routes {
            let n = route.customers.len();
            if n < 2 {
                continue;
            }

            for i in 0..n - 1 {
                for j in i + 1..n {
                    let delta = evaluate_two_opt(&route.customers, i, j, distances);
                    if self.is_improving(delta) {
                        return Some(TwoOptMove {
                            vehicle: route.vehicle,
                            i,
                            j,
                        });
                    }
                }
            }
        }

        None
    }

    fn apply_two_opt(
        &mut self,
        solution: &mut Solution,
        problem: &Problem,
        distances: &DistanceMatrix,
        mv: TwoOptMove,
    ) {
        let route = &mut solution.routes[mv.vehicle];
        route.customers[mv.i..=mv.j].reverse();
        route.evaluate(problem, distances);
        solution.update_distance();
    }
}

/// Distance change of reversing `customers[i..=j]`.
///
/// Only the two boundary edges change; the reversed segment costs the same in
/// both directions.
pub fn evaluate_two_opt(customers: &[usize], i: usize, j: usize, distances: &DistanceMatrix) -> f64 {
    let before = predecessor(customers, i);
    let after = successor(customers, j);

    let old_cost = distances.distance(before, customers[i]) + distances.distance(customers[j], after);
    let new_cost = distances.distance(before, customers[j]) + distances.distance(customers[i], after);

    new_cost - old_cost
}
