//! Running-load checks for routes.

use crate::problem::Problem;

/// Stateless capacity predicates over route snapshots.
///
/// The load of a route starts at zero at the depot and grows by the demand of
/// each visited customer. No slack is allowed.
pub struct CapacityTracker;

impl CapacityTracker {
    /// Cumulative demand of the customers on a route.
    pub fn load(problem: &Problem, customers: &[usize]) -> u64 {
        customers
            .iter()
            .fold(0u64, |load, &c| load.saturating_add(problem.demand(c)))
    }

    /// Whether `extra` more units still fit on top of `load`.
    #[inline]
    pub fn fits(load: u64, extra: u64, capacity: u64) -> bool {
        load.saturating_add(extra) <= capacity
    }

    /// Whether `candidate` can be appended to the route without exceeding `capacity`.
    pub fn can_append(
        problem: &Problem,
        customers: &[usize],
        candidate: usize,
        capacity: u64,
    ) -> bool {
        Self::fits(
            Self::load(problem, customers),
            problem.demand(candidate),
            capacity,
        )
    }
}
