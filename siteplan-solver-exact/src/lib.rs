//! Exact branch-and-bound solver for siteplan.
//!
//! This crate provides [`ExactSolver`], which treats each candidate as a
//! binary decision in the 0/1 integer program
//!
//! ```text
//! maximise   Σ deal_probability_c · x_c
//! subject to Σ adjusted_cost_c · x_c     ≤ budget
//!            Σ required_teammates_c · x_c ≤ max_teammates
//!            x_c ∈ {0, 1}
//! ```
//!
//! and explores it depth first, pruning with the tighter of the two
//! single-constraint fractional relaxations. The search either exhausts the
//! tree, proving optimality, or stops at the configured node or time limit
//! with [`SolveError::Timeout`](siteplan_core::SolveError::Timeout). A
//! partial incumbent is never returned.

#![forbid(unsafe_code)]

mod search;
mod solver;

pub use solver::{ExactSolver, ExactSolverConfig};
