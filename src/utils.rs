//! Output helpers: solution file, console summary and formatting.

use csv::{QuoteStyle, WriterBuilder};
use itertools::Itertools;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::error::SolverError;
use crate::problem::{Problem, DEPOT};
use crate::solution::Solution;

/// Format a duration as hours, minutes, and seconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}h {:02}m {:02}s", hours, minutes, seconds)
}

/// Save a solution to a tab-separated file.
pub fn save_solution<P: AsRef<Path>>(solution: &Solution, path: P) -> Result<(), SolverError> {
    write_solution(solution, File::create(path)?)
}

/// Write a solution as tab-separated rows.
///
/// The first row holds the total distance and the status code. Each vehicle
/// then gets a row with its index and its stops as a quoted, space-separated
/// list ending at the depot; the leading depot is implied.
pub fn write_solution<W: Write>(solution: &Solution, writer: W) -> Result<(), SolverError> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::NonNumeric)
        .flexible(true)
        .from_writer(writer);

    writer.write_record([
        solution.distance.to_string(),
        solution.status.code().to_string(),
    ])?;

    for route in &solution.routes {
        let stops = route
            .customers
            .iter()
            .chain(std::iter::once(&DEPOT))
            .join(" ");
        writer.write_record([route.vehicle.to_string(), stops])?;
    }

    writer.flush()?;
    Ok(())
}

/// Human-readable per-route summary.
///
/// Each stop shows the load carried after serving it, depot legs included.
pub fn format_solution(solution: &Solution, problem: &Problem) -> String {
    SolutionSummary { solution, problem }.to_string()
}

struct SolutionSummary<'a> {
    solution: &'a Solution,
    problem: &'a Problem,
}

impl fmt::Display for SolutionSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for route in &self.solution.routes {
            writeln!(
                f,
                "Route for vehicle {} - Capacity {}:",
                route.vehicle,
                self.problem.capacity(route.vehicle)
            )?;

            let mut load = 0;
            let stops = route
                .path()
                .into_iter()
                .map(|location| {
                    load += self.problem.demand(location);
                    format!(" {} Load({})", location, load)
                })
                .join(" -> ");

            writeln!(f, "{}", stops)?;
            writeln!(f, "Distance of the route: {:.2}", route.distance)?;
            writeln!(f, "Load of the route: {}", route.load)?;
            writeln!(f)?;
        }

        writeln!(f, "Total Distance of all routes: {:.2}", self.solution.distance)?;
        writeln!(f, "Status: {}", self.solution.status)
    }
}

/// Print the route summary on the console.
pub fn print_solution(solution: &Solution, problem: &Problem) {
    print!("{}", format_solution(solution, problem));
}
