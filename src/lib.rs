//! Facade crate for the siteplan site-selection optimiser.
//!
//! This crate re-exports the core domain types and exposes the solver
//! implementations behind feature flags. `solver-greedy` and `solver-exact`
//! are enabled by default; `solver-milp` pulls in the optional MILP backend.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use siteplan_core::{
    Candidate, CandidateError, CandidateRecord, CandidateSet, ControllerState, Equipment,
    Fallback, FailureEvent, InstanceError, InstanceRecord, Limits, MapCentre, MapPayload,
    ProblemInstance, RecordingRenderer, Renderer, ReoptimizationController, ReoptimizeError,
    Solution, SolveError, Solver,
};

#[cfg(feature = "solver-greedy")]
#[cfg_attr(docsrs, doc(cfg(feature = "solver-greedy")))]
pub use siteplan_solver_greedy::GreedySolver;

#[cfg(feature = "solver-exact")]
#[cfg_attr(docsrs, doc(cfg(feature = "solver-exact")))]
pub use siteplan_solver_exact::{ExactSolver, ExactSolverConfig};

#[cfg(feature = "solver-milp")]
#[cfg_attr(docsrs, doc(cfg(feature = "solver-milp")))]
pub use siteplan_solver_milp::{MilpSolver, MilpSolverConfig};
