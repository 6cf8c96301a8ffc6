//! Problem definition and data structures for CVRP.

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use crate::error::SolverError;

/// Index of the depot in every location table.
pub const DEPOT: usize = 0;

/// Represents a node (customer or depot) in the CVRP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub demand: u64,
}

impl Node {
    /// Create a new node.
    pub fn new(id: usize, x: f64, y: f64, demand: u64) -> Self {
        Node { id, x, y, demand }
    }

    /// The depot sits at the origin and demands nothing.
    pub fn depot() -> Self {
        Node::new(DEPOT, 0.0, 0.0, 0)
    }

    pub fn is_depot(&self) -> bool {
        self.id == DEPOT
    }

    /// Calculate the Euclidean distance between two nodes.
    pub fn distance(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Represents a validated, immutable CVRP instance.
///
/// Location 0 is always the depot; customers occupy 1..=N in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    nodes: Vec<Node>,
    capacities: Vec<u64>,
}

impl Problem {
    /// Create an instance where all `num_vehicles` vehicles share `capacity`.
    ///
    /// `customers` holds one `(demand, x, y)` tuple per customer.
    pub fn new(
        num_customers: usize,
        num_vehicles: usize,
        capacity: u64,
        customers: Vec<(u64, f64, f64)>,
    ) -> Result<Self, SolverError> {
        if customers.len() != num_customers {
            return Err(SolverError::InvalidInput(format!(
                "expected {} customer rows, found {}",
                num_customers,
                customers.len()
            )));
        }

        Problem::with_capacities(customers, vec![capacity; num_vehicles])
    }

    /// Create an instance with one capacity per vehicle.
    pub fn with_capacities(
        customers: Vec<(u64, f64, f64)>,
        capacities: Vec<u64>,
    ) -> Result<Self, SolverError> {
        if capacities.is_empty() {
            return Err(SolverError::InvalidInput(
                "at least one vehicle is required".to_string(),
            ));
        }

        let mut nodes = Vec::with_capacity(customers.len() + 1);
        nodes.push(Node::depot());

        for (i, (demand, x, y)) in customers.into_iter().enumerate() {
            let id = i + 1;
            if !x.is_finite() || !y.is_finite() {
                return Err(SolverError::InvalidInput(format!(
                    "customer {} has a non-finite coordinate ({}, {})",
                    id, x, y
                )));
            }
            nodes.push(Node::new(id, x, y, demand));
        }

        Ok(Problem { nodes, capacities })
    }

    /// Number of locations including the depot (N + 1).
    pub fn location_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of customers (excluding the depot).
    pub fn customer_count(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn vehicle_count(&self) -> usize {
        self.capacities.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn demand(&self, location: usize) -> u64 {
        self.nodes[location].demand
    }

    pub fn coordinate(&self, location: usize) -> (f64, f64) {
        let node = &self.nodes[location];
        (node.x, node.y)
    }

    pub fn capacity(&self, vehicle: usize) -> u64 {
        self.capacities[vehicle]
    }

    pub fn capacities(&self) -> &[u64] {
        &self.capacities
    }

    /// Sum of all customer demands, widened so large inputs cannot overflow.
    pub fn total_demand(&self) -> u128 {
        self.nodes.iter().map(|node| u128::from(node.demand)).sum()
    }

    /// Sum of all vehicle capacities, widened like `total_demand`.
    pub fn total_capacity(&self) -> u128 {
        self.capacities.iter().map(|&capacity| u128::from(capacity)).sum()
    }

    /// Pre-solve gate: reject empty instances and instances whose fleet cannot
    /// carry the aggregate demand.
    ///
    /// Passing is necessary but not sufficient for construction to succeed.
    pub fn check_feasibility(&self) -> Result<(), SolverError> {
        if self.customer_count() == 0 {
            return Err(SolverError::InfeasibleInstance(
                "the instance has no customers".to_string(),
            ));
        }

        let demand = self.total_demand();
        let capacity = self.total_capacity();
        if capacity < demand {
            return Err(SolverError::InfeasibleInstance(format!(
                "total demand {} exceeds total vehicle capacity {}",
                demand, capacity
            )));
        }

        Ok(())
    }

    /// Load a problem from a tab-separated file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SolverError> {
        let path = path.as_ref();
        debug!("Reading instance from {}", path.display());
        Problem::from_reader(File::open(path)?)
    }

    /// Load a problem from tab-separated text.
    ///
    /// The first row is `N V C`; each of the next N rows is `demand x y`.
    /// Fields may be wrapped in double quotes.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SolverError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .quote(b'"')
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut records = reader.records();

        let header = records
            .next()
            .ok_or_else(|| SolverError::InvalidInput("input is empty".to_string()))??;
        check_field_count(&header, 1)?;
        let num_customers: usize = parse_field(&header, 0, 1, "customer count")?;
        let num_vehicles: usize = parse_field(&header, 1, 1, "vehicle count")?;
        let capacity: u64 = parse_field(&header, 2, 1, "capacity")?;

        let mut customers = Vec::with_capacity(num_customers);
        for (i, record) in records.enumerate() {
            let record = record?;
            let line = i + 2;
            check_field_count(&record, line)?;
            let demand: u64 = parse_field(&record, 0, line, "demand")?;
            let x: f64 = parse_field(&record, 1, line, "x")?;
            let y: f64 = parse_field(&record, 2, line, "y")?;
            customers.push((demand, x, y));
        }

        debug!(
            "Parsed {} customers, {} vehicles with capacity {}",
            customers.len(),
            num_vehicles,
            capacity
        );

        Problem::new(num_customers, num_vehicles, capacity, customers)
    }
}

fn check_field_count(record: &StringRecord, line: usize) -> Result<(), SolverError> {
    if record.len() < 3 {
        return Err(SolverError::InvalidInput(format!(
            "line {}: expected 3 fields, found {}",
            line,
            record.len()
        )));
    }
    Ok(())
}

fn parse_field<T: FromStr>(
    record: &StringRecord,
    index: usize,
    line: usize,
    name: &str,
) -> Result<T, SolverError> {
    let raw = record.get(index).unwrap_or_default();
    raw.parse::<T>().map_err(|_| {
        SolverError::InvalidInput(format!("line {}: {} '{}' is not a number", line, name, raw))
    })
}
