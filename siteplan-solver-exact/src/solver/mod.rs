//! `ExactSolver` implementation backed by branch and bound.

use std::time::{Duration, Instant};

use siteplan_core::{Candidate, ProblemInstance, Solution, SolveError, Solver};

use crate::search::{self, Item, SearchLimits};

/// Configuration for [`ExactSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactSolverConfig {
    /// Upper bound on branch-and-bound nodes before giving up.
    pub max_nodes: u64,
    /// Upper bound on wall-clock time before giving up.
    pub time_limit: Duration,
}

impl Default for ExactSolverConfig {
    fn default() -> Self {
        Self {
            max_nodes: 5_000_000,
            time_limit: Duration::from_secs(10),
        }
    }
}

/// Solver that proves optimality or reports [`SolveError::Timeout`].
///
/// Candidates that cannot fit on their own are dropped before the search
/// starts. The selection is reported in instance order.
#[derive(Debug, Clone, Default)]
pub struct ExactSolver {
    config: ExactSolverConfig,
}

impl ExactSolver {
    /// Construct a solver using default limits.
    pub fn new() -> Self {
        Self::with_config(ExactSolverConfig::default())
    }

    /// Construct a solver with explicit limits.
    pub const fn with_config(config: ExactSolverConfig) -> Self {
        Self { config }
    }

    /// Limits applied to each solve.
    pub const fn config(&self) -> &ExactSolverConfig {
        &self.config
    }
}

impl Solver for ExactSolver {
    fn solve(&self, instance: &ProblemInstance) -> Result<Solution, SolveError> {
        let started_at = Instant::now();
        let limits = instance.limits();

        let (viable, excluded): (Vec<&Candidate>, Vec<&Candidate>) = instance
            .candidates()
            .iter()
            .partition(|candidate| limits.fits([*candidate]));
        if !excluded.is_empty() {
            log::debug!(
                "excluding {} candidates that cannot fit on their own: {:?}",
                excluded.len(),
                excluded.iter().map(|c| c.name()).collect::<Vec<_>>()
            );
        }

        let items: Vec<Item> = viable
            .iter()
            .zip(name_ranks(&viable))
            .map(|(candidate, name_rank)| to_item(candidate, name_rank))
            .collect();
        let outcome = search::maximise(
            &items,
            limits,
            SearchLimits {
                max_nodes: self.config.max_nodes,
                time_limit: self.config.time_limit,
            },
        )
        .inspect_err(|err| log::warn!("exact search abandoned: {err}"))?;

        let selected: Vec<Candidate> = outcome
            .selected
            .iter()
            .filter_map(|&index| viable.get(index).map(|&candidate| candidate.clone()))
            .collect();
        log::debug!(
            "exact search proved optimum {:.4} over {} candidates in {} nodes ({:?})",
            outcome.value,
            items.len(),
            outcome.nodes_explored,
            started_at.elapsed()
        );
        Ok(Solution::from_selection(selected))
    }

    fn name(&self) -> &'static str {
        "exact"
    }
}

fn to_item(candidate: &Candidate, name_rank: usize) -> Item {
    Item {
        value: candidate.deal_probability(),
        cost: candidate.adjusted_cost(),
        teammates: u64::from(candidate.required_teammates()),
        name_rank,
    }
}

/// Position of each candidate's name in ascending name order.
fn name_ranks(candidates: &[&Candidate]) -> Vec<usize> {
    let mut by_name: Vec<usize> = (0..candidates.len()).collect();
    by_name.sort_by_key(|&index| candidates.get(index).map(|candidate| candidate.name()));
    let mut ranks = vec![0; candidates.len()];
    for (rank, index) in by_name.into_iter().enumerate() {
        if let Some(slot) = ranks.get_mut(index) {
            *slot = rank;
        }
    }
    ranks
}

#[cfg(test)]
mod tests;
