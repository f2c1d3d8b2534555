//! Solver abstraction and strategy composition.

use std::time::Duration;

use thiserror::Error;

use crate::{ProblemInstance, Solution};

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The solver could not prove optimality within its operational limits.
    ///
    /// Callers may retry with relaxed limits or a heuristic strategy.
    #[error("solver gave up after exploring {nodes_explored} nodes in {elapsed:?}")]
    Timeout {
        /// Search nodes visited before giving up.
        nodes_explored: u64,
        /// Wall-clock time spent before giving up.
        elapsed: Duration,
    },
    /// An external optimisation backend reported a failure.
    #[error("optimisation backend failed: {0}")]
    Backend(String),
}

/// Choose a feasible subset of an instance's candidates.
///
/// Implementations must return a [`Solution`] whose totals respect the
/// instance limits, and must be deterministic for a given instance.
/// Solvers must be `Send + Sync` so independent instances can be solved on
/// separate threads.
pub trait Solver: Send + Sync {
    /// Solve an instance, producing a feasible selection or an error.
    fn solve(&self, instance: &ProblemInstance) -> Result<Solution, SolveError>;

    /// Short label used in logs and reports.
    fn name(&self) -> &'static str;
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn solve(&self, instance: &ProblemInstance) -> Result<Solution, SolveError> {
        (**self).solve(instance)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<S: Solver + ?Sized> Solver for &S {
    fn solve(&self, instance: &ProblemInstance) -> Result<Solution, SolveError> {
        (**self).solve(instance)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Runs `primary`, switching to `fallback` when `primary` times out.
///
/// Only [`SolveError::Timeout`] triggers the fallback; other failures are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use siteplan_core::{Fallback, ProblemInstance, Solution, SolveError, Solver};
///
/// struct Always(Result<Solution, SolveError>);
///
/// impl Solver for Always {
///     fn solve(&self, _: &ProblemInstance) -> Result<Solution, SolveError> {
///         self.0.clone()
///     }
///     fn name(&self) -> &'static str {
///         "always"
///     }
/// }
///
/// let slow = Always(Err(SolveError::Timeout {
///     nodes_explored: 1,
///     elapsed: std::time::Duration::ZERO,
/// }));
/// let fast = Always(Ok(Solution::empty()));
/// let solver = Fallback::new(slow, fast);
/// # let instance = ProblemInstance::new(
/// #     Default::default(),
/// #     siteplan_core::Limits::new(0.0, 0).unwrap(),
/// # );
/// assert_eq!(solver.solve(&instance), Ok(Solution::empty()));
/// ```
#[derive(Debug, Clone)]
pub struct Fallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> Fallback<P, F>
where
    P: Solver,
    F: Solver,
{
    /// Pairs a primary solver with its fallback.
    pub const fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P, F> Solver for Fallback<P, F>
where
    P: Solver,
    F: Solver,
{
    fn solve(&self, instance: &ProblemInstance) -> Result<Solution, SolveError> {
        match self.primary.solve(instance) {
            Err(SolveError::Timeout {
                nodes_explored,
                elapsed,
            }) => {
                log::warn!(
                    "{} timed out after {nodes_explored} nodes in {elapsed:?}; falling back to {}",
                    self.primary.name(),
                    self.fallback.name()
                );
                self.fallback.solve(instance)
            }
            other => other,
        }
    }

    fn name(&self) -> &'static str {
        self.primary.name()
    }
}
