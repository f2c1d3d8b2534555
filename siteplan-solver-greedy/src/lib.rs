//! Greedy value-density solver for siteplan.
//!
//! This crate provides [`GreedySolver`], the fast implementation of the
//! [`Solver`](siteplan_core::Solver) trait. Candidates are ranked once by
//! deal probability per unit of adjusted cost and admitted in that order
//! while budget and headcount allow. There is no backtracking, so the result
//! is always feasible but not necessarily optimal.

#![forbid(unsafe_code)]

mod solver;

pub use solver::{GreedySolver, rank};
