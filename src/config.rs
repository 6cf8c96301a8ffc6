//! Configuration parameters for the CVRP solver.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::error::SolverError;

/// Configuration settings for the solver.
///
/// Every field has a default, so a JSON file only needs the keys it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wall-clock budget for the improvement phase
    pub time_limit: Duration,
    /// Optional cap on accepted local search moves
    pub max_iterations: Option<u64>,
    /// Longest chain of consecutive customers an or-opt move relocates
    pub max_chain_length: usize,
    /// A move must lower the distance by more than this to be accepted
    pub improvement_threshold: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            time_limit: Duration::from_secs(60),
            max_iterations: None,
            max_chain_length: 3,
            improvement_threshold: 1e-6,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SolverError> {
        let reader = BufReader::new(File::open(path)?);
        let config: Config = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the search cannot honour.
    pub fn validate(&self) -> Result<(), SolverError> {
        if !self.improvement_threshold.is_finite() || self.improvement_threshold < 0.0 {
            return Err(SolverError::InvalidInput(format!(
                "improvement_threshold must be a finite, non-negative number, got {}",
                self.improvement_threshold
            )));
        }
        if self.max_chain_length == 0 {
            return Err(SolverError::InvalidInput(
                "max_chain_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the time limit.
    pub fn with_time_limit(mut self, duration: Duration) -> Self {
        self.time_limit = duration;
        self
    }

    /// Set the maximum number of accepted moves.
    pub fn with_max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Set the longest or-opt chain.
    pub fn with_max_chain_length(mut self, length: usize) -> Self {
        self.max_chain_length = length.max(1);
        self
    }

    /// Set the minimum improvement for a move to count.
    ///
    /// Negative or non-finite values fall back to zero, which still demands a
    /// strict decrease.
    pub fn with_improvement_threshold(mut self, threshold: f64) -> Self {
        self.improvement_threshold = clamp_threshold(threshold);
        self
    }
}

pub(crate) fn clamp_threshold(threshold: f64) -> f64 {
    if threshold.is_finite() {
        threshold.max(0.0)
    } else {
        0.0
    }
}
