//! Error types shared by the solver and its I/O collaborators.

use thiserror::Error;

/// Everything that can stop a solver run before a solution is produced.
///
/// A run cut short by its time budget is not an error: it completes with
/// [`SolveStatus::TimedOut`](crate::solution::SolveStatus::TimedOut).
#[derive(Debug, Error)]
pub enum SolverError {
    /// Malformed rows, missing fields or non-numeric values.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Rejected by the pre-solve gate (no customers or too little capacity).
    #[error("Infeasible instance: {0}")]
    InfeasibleInstance(String),

    /// Construction got stuck with customers left over.
    #[error("Construction could not place customers {unassigned:?}")]
    InfeasibleConstruction { unassigned: Vec<usize> },

    /// A solution broke one of the coverage, shape, capacity or distance invariants.
    #[error("Invalid solution: {0}")]
    InvalidSolution(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}
