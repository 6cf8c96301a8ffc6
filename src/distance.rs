//! Dense, precomputed Euclidean distance table.

use itertools::Itertools;

use crate::problem::Problem;

/// A square distance table over every location, depot included, stored in
/// row-major order.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Precompute all pairwise distances of `problem`.
    pub fn new(problem: &Problem) -> Self {
        let nodes = problem.nodes();
        let size = nodes.len();
        let mut data = vec![0.0; size * size];

        for i in 0..size {
            for j in (i + 1)..size {
                let d = nodes[i].distance(&nodes[j]);
                data[i * size + j] = d;
                data[j * size + i] = d;
            }
        }

        DistanceMatrix { data, size }
    }

    /// Distance between locations `from` and `to`.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations in the table.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Sum of the distances between consecutive entries of `path`.
    pub fn route_distance(&self, path: &[usize]) -> f64 {
        path.iter()
            .tuple_windows()
            .map(|(&from, &to)| self.distance(from, to))
            .sum()
    }
}
