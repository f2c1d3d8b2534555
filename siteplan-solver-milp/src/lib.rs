//! Optional mixed-integer programming backend for siteplan.
//!
//! [`MilpSolver`] hands the 0/1 selection program to an external MILP
//! engine through `good_lp`, using the pure-Rust `microlp` backend so no
//! native libraries are needed. It is an alternative to the in-tree
//! branch-and-bound solver and is compiled only behind the `solver-milp`
//! feature of the facade crate.
//!
//! The backend offers no cooperative cancellation. The time limit is
//! checked once the engine returns, and a late answer is discarded in
//! favour of [`SolveError::Timeout`].

#![forbid(unsafe_code)]

use std::time::{Duration, Instant};

use good_lp::{
    Expression, ProblemVariables, Solution as _, SolverModel, constraint, microlp, variable,
};
use siteplan_core::{Candidate, ProblemInstance, Solution, SolveError, Solver};

/// Configuration for [`MilpSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MilpSolverConfig {
    /// Answers arriving later than this are discarded.
    pub time_limit: Duration,
}

impl Default for MilpSolverConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(10),
        }
    }
}

/// Solver delegating to the `microlp` MILP engine.
#[derive(Debug, Clone, Default)]
pub struct MilpSolver {
    config: MilpSolverConfig,
}

impl MilpSolver {
    /// Construct a solver with the default time limit.
    pub fn new() -> Self {
        Self::with_config(MilpSolverConfig::default())
    }

    /// Construct a solver with an explicit time limit.
    pub const fn with_config(config: MilpSolverConfig) -> Self {
        Self { config }
    }
}

impl Solver for MilpSolver {
    fn solve(&self, instance: &ProblemInstance) -> Result<Solution, SolveError> {
        let started_at = Instant::now();
        let limits = instance.limits();
        let viable: Vec<&Candidate> = instance
            .candidates()
            .iter()
            .filter(|candidate| limits.fits([*candidate]))
            .collect();
        if viable.is_empty() {
            return Ok(Solution::empty());
        }

        let mut vars = ProblemVariables::new();
        let picks: Vec<_> = viable
            .iter()
            .map(|candidate| vars.add(variable().binary().name(candidate.name())))
            .collect();

        let objective: Expression = viable
            .iter()
            .zip(&picks)
            .map(|(candidate, &pick)| candidate.deal_probability() * pick)
            .sum();
        let spend: Expression = viable
            .iter()
            .zip(&picks)
            .map(|(candidate, &pick)| candidate.adjusted_cost() * pick)
            .sum();
        let headcount: Expression = viable
            .iter()
            .zip(&picks)
            .map(|(candidate, &pick)| f64::from(candidate.required_teammates()) * pick)
            .sum();

        let budget = limits.budget();
        let seats = f64::from(limits.max_teammates());

        log::debug!("handing {} binary variables to microlp", picks.len());
        let model = vars
            .maximise(objective)
            .using(microlp)
            .with(constraint!(spend <= budget))
            .with(constraint!(headcount <= seats))
            .solve()
            .map_err(|err| SolveError::Backend(err.to_string()))?;

        let elapsed = started_at.elapsed();
        if elapsed > self.config.time_limit {
            log::warn!("microlp answered after {elapsed:?}, past the time limit");
            return Err(SolveError::Timeout {
                nodes_explored: 0,
                elapsed,
            });
        }

        let selected: Vec<Candidate> = viable
            .iter()
            .zip(&picks)
            .filter(|&(_, &pick)| model.value(pick) > 0.5)
            .map(|(&candidate, _)| candidate.clone())
            .collect();
        if !limits.fits(&selected) {
            return Err(SolveError::Backend(
                "backend returned a selection that exceeds the limits".to_owned(),
            ));
        }
        let solution = Solution::from_selection(selected);
        log::debug!(
            "microlp selected {} candidates in {elapsed:?} (objective {:.4})",
            solution.len(),
            solution.objective()
        );
        Ok(solution)
    }

    fn name(&self) -> &'static str {
        "milp"
    }
}
