//! Core domain types for the siteplan selection optimiser.
//!
//! A [`ProblemInstance`] pairs a validated [`CandidateSet`] with its
//! [`Limits`]. Solvers implement [`Solver`] and return a feasible
//! [`Solution`]; the [`ReoptimizationController`] keeps a solution current as
//! candidates fail and forwards a [`MapPayload`] to a [`Renderer`].
//!
//! Constructors return `Result` so malformed input is rejected before any
//! solver sees it.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod candidate;
mod instance;
mod render;
mod reoptimize;
mod solution;
mod solver;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use candidate::{Candidate, CandidateError, CandidateRecord, Equipment};
pub use instance::{CandidateSet, InstanceError, InstanceRecord, Limits, ProblemInstance};
pub use render::{MapCentre, MapPayload, RecordingRenderer, Renderer};
pub use reoptimize::{ControllerState, FailureEvent, ReoptimizationController, ReoptimizeError};
pub use solution::Solution;
pub use solver::{Fallback, SolveError, Solver};
