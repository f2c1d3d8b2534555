//! Re-optimisation after a selected site becomes unavailable.
//!
//! [`ReoptimizationController`] owns the current instance and its solution.
//! A [`FailureEvent`] removes one candidate, re-runs the configured
//! [`Solver`] over what remains, installs the new solution and forwards its
//! [`MapPayload`] to the [`Renderer`]. Events are applied one at a time; the
//! `&mut self` receiver rules out overlapping re-optimisations.

use thiserror::Error;

use crate::{MapPayload, ProblemInstance, Renderer, Solution, SolveError, Solver};

/// External signal retracting a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureEvent {
    /// The named candidate can no longer be used.
    CandidateFailed(String),
}

/// Lifecycle of a [`ReoptimizationController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerState {
    /// A solution is installed for the current instance.
    #[default]
    Stable,
    /// A failure event is being processed.
    Reoptimizing,
}

/// Errors returned while applying a [`FailureEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReoptimizeError {
    /// The event named a candidate absent from the current instance.
    #[error("candidate {name:?} is not part of the current instance")]
    UnknownCandidate {
        /// Name carried by the event.
        name: String,
    },
    /// The solver failed on the reduced instance.
    #[error(transparent)]
    Solve(#[from] SolveError),
}

/// Keeps a solution current as candidates fail.
///
/// # Examples
///
/// ```
/// use siteplan_core::{
///     ControllerState, ProblemInstance, RecordingRenderer, ReoptimizationController, Solution,
///     SolveError, Solver,
/// };
///
/// struct TakeNothing;
///
/// impl Solver for TakeNothing {
///     fn solve(&self, _: &ProblemInstance) -> Result<Solution, SolveError> {
///         Ok(Solution::empty())
///     }
///     fn name(&self) -> &'static str {
///         "nothing"
///     }
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let instance = ProblemInstance::new(Default::default(), siteplan_core::Limits::new(10.0, 1)?);
/// let controller =
///     ReoptimizationController::new(instance, TakeNothing, RecordingRenderer::default())?;
/// assert_eq!(controller.state(), ControllerState::Stable);
/// assert!(controller.solution().is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ReoptimizationController<S, R> {
    instance: ProblemInstance,
    solution: Solution,
    solver: S,
    renderer: R,
    state: ControllerState,
}

impl<S, R> ReoptimizationController<S, R>
where
    S: Solver,
    R: Renderer,
{
    /// Solves `instance` and installs the result.
    ///
    /// The initial solution is not rendered; only re-optimisations are.
    pub fn new(instance: ProblemInstance, solver: S, renderer: R) -> Result<Self, SolveError> {
        let solution = solver.solve(&instance)?;
        log::debug!(
            "{} selected {:?} (objective {:.4})",
            solver.name(),
            solution.names(),
            solution.objective()
        );
        Ok(Self::with_solution(instance, solution, solver, renderer))
    }

    /// Installs a solution computed elsewhere.
    pub const fn with_solution(
        instance: ProblemInstance,
        solution: Solution,
        solver: S,
        renderer: R,
    ) -> Self {
        Self {
            instance,
            solution,
            solver,
            renderer,
            state: ControllerState::Stable,
        }
    }

    /// Applies a failure event and returns the new solution.
    ///
    /// On error the installed instance and solution are left untouched.
    pub fn apply(&mut self, event: FailureEvent) -> Result<&Solution, ReoptimizeError> {
        match event {
            FailureEvent::CandidateFailed(name) => self.candidate_failed(&name),
        }
    }

    /// Removes `name` from the instance and re-solves the remainder.
    ///
    /// Candidates that were not part of the installed solution may also be
    /// removed; the result is still a fresh solve over the reduced instance.
    pub fn candidate_failed(&mut self, name: &str) -> Result<&Solution, ReoptimizeError> {
        let reduced =
            self.instance
                .without(name)
                .ok_or_else(|| ReoptimizeError::UnknownCandidate {
                    name: name.to_owned(),
                })?;

        self.state = ControllerState::Reoptimizing;
        log::info!(
            "candidate {name:?} failed; re-optimising {} remaining candidates with {}",
            reduced.candidates().len(),
            self.solver.name()
        );
        let outcome = self.solver.solve(&reduced);
        self.state = ControllerState::Stable;
        let solution = outcome?;

        let payload = MapPayload::from_solution(&solution);
        self.instance = reduced;
        self.solution = solution;
        log::info!(
            "installed {:?} (objective {:.4})",
            self.solution.names(),
            self.solution.objective()
        );
        self.renderer.render(&payload);
        Ok(&self.solution)
    }

    /// Instance the installed solution was computed for.
    pub const fn instance(&self) -> &ProblemInstance {
        &self.instance
    }

    /// Installed solution.
    pub const fn solution(&self) -> &Solution {
        &self.solution
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> ControllerState {
        self.state
    }

    /// Renderer receiving map payloads.
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Solver used for re-optimisation.
    pub const fn solver(&self) -> &S {
        &self.solver
    }

    /// Consumes the controller, returning the instance, solution and renderer.
    pub fn into_parts(self) -> (ProblemInstance, Solution, R) {
        (self.instance, self.solution, self.renderer)
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used, reason = "tests unwrap known-good fixtures")]

    use super::*;
    use crate::RecordingRenderer;
    use crate::test_support::{TakeAllThatFit, sample_instance};
    use rstest::rstest;
    use std::time::Duration;

    struct TimesOutBelow(usize);

    impl Solver for TimesOutBelow {
        fn solve(&self, instance: &ProblemInstance) -> Result<Solution, SolveError> {
            if instance.candidates().len() < self.0 {
                return Err(SolveError::Timeout {
                    nodes_explored: 0,
                    elapsed: Duration::ZERO,
                });
            }
            TakeAllThatFit.solve(instance)
        }

        fn name(&self) -> &'static str {
            "times-out"
        }
    }

    #[rstest]
    fn failure_removes_candidate_and_renders() {
        let mut controller = ReoptimizationController::new(
            sample_instance(),
            TakeAllThatFit,
            RecordingRenderer::default(),
        )
        .unwrap();
        assert_eq!(controller.solution().names(), vec!["A", "B"]);
        assert!(controller.renderer().payloads().is_empty());

        let solution = controller
            .apply(FailureEvent::CandidateFailed("A".into()))
            .unwrap();
        assert_eq!(solution.names(), vec!["B", "C"]);
        assert!(!controller.instance().candidates().contains("A"));
        assert_eq!(controller.state(), ControllerState::Stable);

        let payload = controller.renderer().last().unwrap();
        assert_eq!(payload.coordinates, controller.solution().coordinates());
        assert_eq!(payload.centre.as_ref().map(|c| c.name.as_str()), Some("B"));
    }

    #[rstest]
    fn unknown_candidate_leaves_state_untouched() {
        let mut controller = ReoptimizationController::new(
            sample_instance(),
            TakeAllThatFit,
            RecordingRenderer::default(),
        )
        .unwrap();
        let before = controller.solution().clone();

        let err = controller.candidate_failed("Z").unwrap_err();
        assert_eq!(err, ReoptimizeError::UnknownCandidate { name: "Z".into() });
        assert_eq!(controller.solution(), &before);
        assert_eq!(controller.instance().candidates().len(), 3);
        assert!(controller.renderer().payloads().is_empty());
    }

    #[rstest]
    fn solver_failure_keeps_previous_solution() {
        let instance = sample_instance();
        let solution = TakeAllThatFit.solve(&instance).unwrap();
        let mut controller = ReoptimizationController::with_solution(
            instance,
            solution.clone(),
            TimesOutBelow(3),
            RecordingRenderer::default(),
        );

        let err = controller.candidate_failed("A").unwrap_err();
        assert!(matches!(err, ReoptimizeError::Solve(SolveError::Timeout { .. })));
        assert_eq!(controller.solution(), &solution);
        assert!(controller.instance().candidates().contains("A"));
        assert_eq!(controller.state(), ControllerState::Stable);
    }

    #[rstest]
    fn events_apply_sequentially() {
        let mut controller = ReoptimizationController::new(
            sample_instance(),
            TakeAllThatFit,
            RecordingRenderer::default(),
        )
        .unwrap();
        for name in ["C", "A", "B"] {
            controller.candidate_failed(name).unwrap();
        }
        let (instance, solution, renderer) = controller.into_parts();
        assert!(instance.candidates().is_empty());
        assert!(solution.is_empty());
        assert_eq!(renderer.payloads().len(), 3);
        assert!(renderer.last().unwrap().centre.is_none());
    }
}
