//! Unit tests for the Solution and Route structures.

use cvrp_solver::distance::DistanceMatrix;
use cvrp_solver::error::SolverError;
use cvrp_solver::problem::Problem;
use cvrp_solver::solution::{Route, Solution, SolveStatus};

/// Creates a simple test problem with a depot and five customers in a grid.
fn create_test_problem() -> (Problem, DistanceMatrix) {
    let problem = Problem::new(
        5,
        2,
        5,
        vec![
            (1, 10.0, 0.0),
            (1, 0.0, 10.0),
            (1, 10.0, 10.0),
            (2, 20.0, 0.0),
            (2, 20.0, 10.0),
        ],
    )
    .unwrap();
    let distances = DistanceMatrix::new(&problem);
    (problem, distances)
}

fn create_test_solution(problem: &Problem, distances: &DistanceMatrix) -> Solution {
    let routes = vec![
        Route::with_customers(0, vec![1, 2], problem, distances),
        Route::with_customers(1, vec![3, 4, 5], problem, distances),
    ];
    Solution::extract(routes, problem, distances, SolveStatus::Converged)
}

#[test]
fn test_route_creation() {
    let route = Route::new(3);
    assert_eq!(route.vehicle, 3);
    assert!(route.is_empty());
    assert_eq!(route.load, 0);
    assert_eq!(route.distance, 0.0);
    assert_eq!(route.end(), 0);
    assert_eq!(route.path(), vec![0, 0]);
}

#[test]
fn test_route_evaluate() {
    let (problem, distances) = create_test_problem();

    let route = Route::with_customers(0, vec![1, 3, 5], &problem, &distances);

    // Depot -> 1 -> 3 -> 5 -> Depot
    let expected = 10.0 + 10.0 + 10.0 + (20.0f64 * 20.0 + 10.0 * 10.0).sqrt();
    assert!((route.distance - expected).abs() < 1e-6);
    assert_eq!(route.load, 4);
    assert_eq!(route.end(), 5);
    assert_eq!(route.path(), vec![0, 1, 3, 5, 0]);
    assert!(!route.exceeds_capacity(5));
    assert!(route.exceeds_capacity(3));
}

#[test]
fn test_extract_orders_routes_and_sums_distance() {
    let (problem, distances) = create_test_problem();

    // Hand in routes out of order with stale figures
    let mut stale = Route::new(1);
    stale.customers = vec![3, 4, 5];
    let routes = vec![stale, Route::with_customers(0, vec![1, 2], &problem, &distances)];

    let solution = Solution::extract(routes, &problem, &distances, SolveStatus::TimedOut);

    assert_eq!(solution.routes[0].vehicle, 0);
    assert_eq!(solution.routes[1].vehicle, 1);
    assert_eq!(solution.routes[1].load, 5);
    assert_eq!(solution.status, SolveStatus::TimedOut);
    assert_eq!(solution.get_used_route_count(), 2);

    let expected = distances.route_distance(&[0, 1, 2, 0]) + distances.route_distance(&[0, 3, 4, 5, 0]);
    assert!((solution.distance - expected).abs() < 1e-9);
    assert!(solution.validate(&problem, &distances).is_ok());
}

#[test]
fn test_validate_detects_missing_customer() {
    let (problem, distances) = create_test_problem();
    let routes = vec![
        Route::with_customers(0, vec![1, 2], &problem, &distances),
        Route::with_customers(1, vec![3, 4], &problem, &distances),
    ];
    let solution = Solution::extract(routes, &problem, &distances, SolveStatus::Converged);

    assert!(matches!(
        solution.validate(&problem, &distances),
        Err(SolverError::InvalidSolution(_))
    ));
}

#[test]
fn test_validate_detects_duplicate_and_depot_visits() {
    let (problem, distances) = create_test_problem();

    let routes = vec![
        Route::with_customers(0, vec![1, 2, 1], &problem, &distances),
        Route::with_customers(1, vec![3, 4, 5], &problem, &distances),
    ];
    let solution = Solution::extract(routes, &problem, &distances, SolveStatus::Converged);
    assert!(solution.validate(&problem, &distances).is_err());

    let routes = vec![
        Route::with_customers(0, vec![1, 0, 2], &problem, &distances),
        Route::with_customers(1, vec![3, 4, 5], &problem, &distances),
    ];
    let solution = Solution::extract(routes, &problem, &distances, SolveStatus::Converged);
    assert!(solution.validate(&problem, &distances).is_err());
}

#[test]
fn test_validate_detects_overload_and_stale_distance() {
    let (problem, distances) = create_test_problem();

    // 1 + 2 + 2 + 1 = 6 > 5
    let routes = vec![
        Route::with_customers(0, vec![1, 4, 5, 2], &problem, &distances),
        Route::with_customers(1, vec![3], &problem, &distances),
    ];
    let solution = Solution::extract(routes, &problem, &distances, SolveStatus::Converged);
    assert!(solution.validate(&problem, &distances).is_err());

    let mut solution = create_test_solution(&problem, &distances);
    solution.distance += 1.0;
    assert!(solution.validate(&problem, &distances).is_err());
}

#[test]
fn test_status_codes_and_labels() {
    assert_eq!(SolveStatus::Optimal.code(), 0);
    assert_eq!(SolveStatus::Converged.code(), 1);
    assert_eq!(SolveStatus::TimedOut.code(), 2);
    assert_eq!(SolveStatus::Infeasible.code(), 3);

    assert_eq!(SolveStatus::Converged.to_string(), "CONVERGED");
    assert_eq!(SolveStatus::TimedOut.to_string(), "TIMED_OUT");
}

#[test]
fn test_solution_debug_lists_routes() {
    let (problem, distances) = create_test_problem();
    let solution = create_test_solution(&problem, &distances);

    let text = format!("{:?}", solution);
    assert!(text.contains("Status: CONVERGED"));
    assert!(text.contains("Vehicle 1: [0, 3, 4, 5, 0]"));
}
