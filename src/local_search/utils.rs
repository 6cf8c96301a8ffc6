//! Distance deltas shared by the local search moves.

use crate::distance::DistanceMatrix;
use crate::problem::DEPOT;

/// Location visited before position `pos` (the depot for the first customer).
#[inline]
pub fn predecessor(customers: &[usize], pos: usize) -> usize {
    if pos == 0 {
        DEPOT
    } else {
        customers[pos - 1]
    }
}

/// Location visited after position `pos` (the depot for the last customer).
#[inline]
pub fn successor(customers: &[usize], pos: usize) -> usize {
    customers.get(pos + 1).copied().unwrap_or(DEPOT)
}

/// Distance saved by cutting `customers[start..start + len]` out of its route
/// and reconnecting the neighbours directly.
pub fn removal_gain(customers: &[usize], start: usize, len: usize, distances: &DistanceMatrix) -> f64 {
    let end = start + len - 1;
    let prev = predecessor(customers, start);
    let next = successor(customers, end);

    distances.distance(prev, customers[start]) + distances.distance(customers[end], next)
        - distances.distance(prev, next)
}

/// Extra distance of placing the chain `first..=last` in gap `gap` of a route,
/// i.e. between `customers[gap - 1]` and `customers[gap]`.
///
/// With `reversed` the chain enters at `last` and leaves at `first`.
pub fn insertion_cost(
    customers: &[usize],
    gap: usize,
    first: usize,
    last: usize,
    reversed: bool,
    distances: &DistanceMatrix,
) -> f64 {
    let prev = if gap == 0 { DEPOT } else { customers[gap - 1] };
    let next = customers.get(gap).copied().unwrap_or(DEPOT);
    let (head, tail) = if reversed { (last, first) } else { (first, last) };

    distances.distance(prev, head) + distances.distance(tail, next) - distances.distance(prev, next)
}
