//! Unit tests for the exact solver.
#![expect(
    clippy::unwrap_used,
    clippy::float_arithmetic,
    reason = "tests unwrap fixtures and compare float totals"
)]

use super::*;
use rstest::{fixture, rstest};
use siteplan_core::test_support::{candidate, instance, sample_instance};

#[fixture]
fn solver() -> ExactSolver {
    ExactSolver::new()
}

#[rstest]
fn sample_instance_selects_a_and_b(solver: ExactSolver) {
    let solution = solver.solve(&sample_instance()).unwrap();
    assert_eq!(solution.names(), ["A", "B"]);
    assert!((solution.objective() - 1.7).abs() < 1e-9);
}

#[rstest]
fn failure_scenario_selects_b_and_c(solver: ExactSolver) {
    let reduced = sample_instance().without("A").unwrap();
    let solution = solver.solve(&reduced).unwrap();
    assert_eq!(solution.names(), ["B", "C"]);
    assert!((solution.objective() - 1.5).abs() < 1e-9);
    assert!((solution.total_adjusted_cost() - 3210.0).abs() < 1e-9);
}

#[rstest]
fn selection_is_reported_in_instance_order(solver: ExactSolver) {
    let instance = instance(
        vec![
            candidate("zeta", 30.0, 0.0, 1, 0.2),
            candidate("alpha", 10.0, 0.0, 1, 0.9),
        ],
        100.0,
        2,
    );
    let solution = solver.solve(&instance).unwrap();
    assert_eq!(solution.names(), ["zeta", "alpha"]);
}

#[rstest]
fn oversized_candidates_are_never_selected(solver: ExactSolver) {
    let instance = instance(
        vec![
            candidate("huge", 1000.0, 0.0, 1, 1.0),
            candidate("crowd", 1.0, 0.0, 9, 1.0),
            candidate("small", 10.0, 0.5, 1, 0.1),
        ],
        100.0,
        3,
    );
    let solution = solver.solve(&instance).unwrap();
    assert_eq!(solution.names(), ["small"]);
}

#[rstest]
fn node_limit_surfaces_timeout() {
    let candidates = (0..24)
        .map(|i| candidate(&format!("site{i:02}"), 100.0 + f64::from(i), 0.1, 1, 0.5))
        .collect();
    let solver = ExactSolver::with_config(ExactSolverConfig {
        max_nodes: 10,
        time_limit: Duration::from_secs(60),
    });
    let err = solver.solve(&instance(candidates, 1000.0, 12)).unwrap_err();
    assert!(matches!(err, SolveError::Timeout { .. }));
}

#[rstest]
fn zero_time_limit_still_solves_tiny_instances() {
    // The clock is only consulted periodically, so tiny searches finish.
    let solver = ExactSolver::with_config(ExactSolverConfig {
        max_nodes: 1_000,
        time_limit: Duration::ZERO,
    });
    assert!(solver.solve(&sample_instance()).is_ok());
}

#[rstest]
fn empty_instance_yields_empty_solution(solver: ExactSolver) {
    let solution = solver.solve(&instance(Vec::new(), 0.0, 0)).unwrap();
    assert!(solution.is_empty());
    assert_eq!(solver.name(), "exact");
}

#[rstest]
fn identical_candidates_resolve_by_name_whatever_the_input_order(solver: ExactSolver) {
    let twins = |names: [&str; 2]| {
        let candidates = names
            .iter()
            .map(|name| candidate(name, 100.0, 0.0, 1, 0.5))
            .collect();
        instance(candidates, 100.0, 5)
    };
    let forward = solver.solve(&twins(["X", "Y"])).unwrap();
    let reversed = solver.solve(&twins(["Y", "X"])).unwrap();
    assert_eq!(forward.names(), ["X"]);
    assert_eq!(reversed.names(), ["X"]);
}

#[rstest]
fn cost_just_above_budget_is_rejected(solver: ExactSolver) {
    let instance = instance(vec![candidate("over", 1000.000_000_5, 0.0, 1, 0.9)], 1000.0, 5);
    let solution = solver.solve(&instance).unwrap();
    assert!(solution.is_empty());
}

#[rstest]
fn tens_of_thousands_of_candidates_solve_without_overflowing() {
    // One site too many for the budget sends the search through every level.
    let candidates = (0..60_000)
        .map(|i| candidate(&format!("site{i:05}"), 1.0, 0.0, 0, 0.5))
        .collect();
    let solver = ExactSolver::with_config(ExactSolverConfig {
        max_nodes: 5_000_000,
        time_limit: Duration::from_secs(600),
    });
    let solution = solver.solve(&instance(candidates, 59_999.0, 0)).unwrap();
    assert_eq!(solution.len(), 59_999);
    assert!(!solution.contains("site59999"));
    assert!(solution.total_adjusted_cost() <= 59_999.0);
}
