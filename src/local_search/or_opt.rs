//! Or-opt neighborhood for local search (intra- and inter-route).

use crate::capacity::CapacityTracker;
use crate::distance::DistanceMatrix;
use crate::problem::Problem;
use crate::solution::Solution;

use super::utils::{insertion_cost, removal_gain};
use super::LocalSearch;

/// Relocation of a chain of consecutive customers.
///
/// `gap` indexes the destination route after the chain has been cut out, so
/// for a move within one route it refers to the shortened sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrOptMove {
    pub from: usize,
    pub start: usize,
    pub len: usize,
    pub to: usize,
    pub gap: usize,
    pub reversed: bool,
}

impl LocalSearch {
    /// Apply the first improving or-opt move.
    ///
    /// Chains of 1 up to `max_chain_length` customers are tried in that order,
    /// in every route, against every gap of every route (their own included),
    /// forward and then reversed. A destination must keep its load within
    /// capacity. Returns `true` if a move was applied.
    pub fn or_opt_neighborhood(
        &mut self,
        solution: &mut Solution,
        problem: &Problem,
        distances: &DistanceMatrix,
    ) -> bool {
        match self.find_or_opt(solution, problem, distances) {
            Some(mv) => {
                self.apply_or_opt(solution, problem, distances, mv);
                true
            }
            None => false,
        }
    }

    fn find_or_opt(
        &self,
        solution: &Solution,
        problem: &Problem,
        distances: &DistanceMatrix,
    ) -> Option<OrOptMove> {
        for len in 1..=self.max_chain_length {
            for source in &solution.routes {
                let customers = &source.customers;
                if customers.len() < len {
                    continue;
                }

                for start in 0..=customers.len() - len {
                    let chain = &customers[start..start + len];
                    let first = chain[0];
                    let last = chain[len - 1];
                    let chain_demand = CapacityTracker::load(problem, chain);
                    let gain = removal_gain(customers, start, len, distances);

                    for target in &solution.routes {
                        let same_route = target.vehicle == source.vehicle;

                        let shortened: Vec<usize>;
                        let sequence: &[usize] = if same_route {
                            shortened = customers[..start]
                                .iter()
                                .chain(&customers[start + len..])
                                .copied()
                                .collect();
                            &shortened
                        } else {
                            if !CapacityTracker::fits(
                                target.load,
                                chain_demand,
                                problem.capacity(target.vehicle),
                            ) {
                                continue;
                            }
                            &target.customers
                        };

                        for gap in 0..=sequence.len() {
                            for reversed in [false, true] {
                                if reversed && len == 1 {
                                    continue;
                                }
                                // Putting the chain back where it was changes nothing
                                if same_route && gap == start && !reversed {
                                    continue;
                                }

                                let delta =
                                    insertion_cost(sequence, gap, first, last, reversed, distances)
                                        - gain;
                                if self.is_improving(delta) {
                                    return Some(OrOptMove {
                                        from: source.vehicle,
                                        start,
                                        len,
                                        to: target.vehicle,
                                        gap,
                                        reversed,
                                    });
                                }
                            }
                        }
                    }
                }
            }
        }

        None
    }

    fn apply_or_opt(
        &mut self,
        solution: &mut Solution,
        problem: &Problem,
        distances: &DistanceMatrix,
        mv: OrOptMove,
    ) {
        let mut chain: Vec<usize> = solution.routes[mv.from]
            .customers
            .drain(mv.start..mv.start + mv.len)
            .collect();
        if mv.reversed {
            chain.reverse();
        }

        let target = &mut solution.routes[mv.to].customers;
        let tail = target.split_off(mv.gap);
        target.extend(chain);
        target.extend(tail);

        solution.routes[mv.from].evaluate(problem, distances);
        if mv.to != mv.from {
            solution.routes[mv.to].evaluate(problem, distances);
        }
        solution.update_distance();

        debug_assert!(
            !solution.routes[mv.to].exceeds_capacity(problem.capacity(mv.to)),
            "or-opt overloaded vehicle {}",
            mv.to
        );
    }
}
