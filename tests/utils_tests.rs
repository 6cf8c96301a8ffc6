//! Tests for output writing, console formatting, configuration and charts.

use cvrp_solver::chart::render_chart;
use cvrp_solver::config::Config;
use cvrp_solver::distance::DistanceMatrix;
use cvrp_solver::error::SolverError;
use cvrp_solver::problem::Problem;
use cvrp_solver::solution::{Route, Solution, SolveStatus};
use cvrp_solver::utils::{format_duration, format_solution, save_solution, write_solution};
use std::io::Write;
use std::time::Duration;

/// Scenario A served by vehicle 0, with an idle second vehicle.
fn create_test_solution() -> (Problem, Solution) {
    let problem = Problem::new(
        3,
        2,
        10,
        vec![(2, 10.0, 0.0), (3, 0.0, 10.0), (4, 10.0, 10.0)],
    )
    .unwrap();
    let distances = DistanceMatrix::new(&problem);
    let routes = vec![
        Route::with_customers(0, vec![1, 3, 2], &problem, &distances),
        Route::new(1),
    ];
    let solution = Solution::extract(routes, &problem, &distances, SolveStatus::Converged);
    (problem, solution)
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Duration::from_secs(0)), "0h 00m 00s");
    assert_eq!(format_duration(Duration::from_secs(3725)), "1h 02m 05s");
}

#[test]
fn test_write_solution_format() {
    let (_, solution) = create_test_solution();

    let mut buffer = Vec::new();
    write_solution(&solution, &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "40\t1");
    assert_eq!(lines[1], "0\t\"1 3 2 0\"");
    assert_eq!(lines[2], "1\t0");
}

#[test]
fn test_save_solution_reads_back() {
    let (_, solution) = create_test_solution();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solution.tsv");

    save_solution(&solution, &path).unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(&path)
        .unwrap();
    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0][0].parse::<f64>().unwrap(), solution.distance);
    assert_eq!(&records[0][1], "1");
    assert_eq!(&records[1][1], "1 3 2 0");
}

#[test]
fn test_format_solution_accumulates_load_per_stop() {
    let (problem, solution) = create_test_solution();

    let text = format_solution(&solution, &problem);

    assert!(text.contains("Route for vehicle 0 - Capacity 10:"));
    assert!(text.contains(" 0 Load(0) ->  1 Load(2) ->  3 Load(6) ->  2 Load(9) ->  0 Load(9)"));
    assert!(text.contains("Load of the route: 9"));
    assert!(text.contains("Route for vehicle 1 - Capacity 10:"));
    assert!(text.contains(" 0 Load(0) ->  0 Load(0)"));
    assert!(text.contains("Total Distance of all routes: 40.00"));
    assert!(text.contains("Status: CONVERGED"));
}

#[test]
fn test_config_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"max_iterations": 5, "time_limit": {{"secs": 2, "nanos": 0}}}}"#
    )
    .unwrap();

    let config = Config::from_json_file(file.path()).unwrap();

    assert_eq!(config.max_iterations, Some(5));
    assert_eq!(config.time_limit, Duration::from_secs(2));
    // Missing keys keep their defaults
    assert_eq!(config.max_chain_length, Config::default().max_chain_length);
}

#[test]
fn test_config_rejects_bad_json() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();

    let result = Config::from_json_file(file.path());
    assert!(matches!(result, Err(SolverError::Config(_))));
}

#[test]
fn test_config_rejects_negative_threshold() {
    for body in [
        r#"{"improvement_threshold": -5.0}"#,
        r#"{"improvement_threshold": -1e-9, "max_iterations": 50}"#,
        r#"{"max_chain_length": 0}"#,
    ] {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", body).unwrap();

        let result = Config::from_json_file(file.path());
        assert!(matches!(result, Err(SolverError::InvalidInput(_))), "{}", body);
    }

    // Zero is still a valid threshold
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"improvement_threshold": 0.0}}"#).unwrap();
    assert_eq!(Config::from_json_file(file.path()).unwrap().improvement_threshold, 0.0);
}

#[test]
fn test_config_builder() {
    let config = Config::new()
        .with_time_limit(Duration::from_millis(500))
        .with_max_iterations(10)
        .with_max_chain_length(0)
        .with_improvement_threshold(1e-3);

    assert_eq!(config.time_limit, Duration::from_millis(500));
    assert_eq!(config.max_iterations, Some(10));
    assert_eq!(config.max_chain_length, 1);
    assert_eq!(config.improvement_threshold, 1e-3);

    assert_eq!(Config::new().with_improvement_threshold(-5.0).improvement_threshold, 0.0);
    assert_eq!(Config::new().with_improvement_threshold(f64::NAN).improvement_threshold, 0.0);
}

#[test]
fn test_render_chart_writes_svg() {
    let (problem, solution) = create_test_solution();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("solution.svg");

    render_chart(&solution, &problem, &path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("<svg"));
    assert!(content.contains("V0"));
}
