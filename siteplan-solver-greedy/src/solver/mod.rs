//! `GreedySolver` implementation.

use std::time::Instant;

use siteplan_core::{Candidate, CandidateSet, ProblemInstance, Solution, SolveError, Solver};

/// Ratio-ranked heuristic solver.
///
/// Runs in `O(n log n)`, dominated by the ranking sort. Never fails on a
/// validated instance.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedySolver;

impl GreedySolver {
    /// Construct a greedy solver.
    pub const fn new() -> Self {
        Self
    }
}

/// Orders candidates by descending value density, then ascending name.
///
/// The name tie-break makes the ranking, and therefore the greedy
/// selection, reproducible.
pub fn rank(candidates: &CandidateSet) -> Vec<&Candidate> {
    let mut ranked: Vec<&Candidate> = candidates.iter().collect();
    ranked.sort_by(|lhs, rhs| {
        rhs.value_density()
            .total_cmp(&lhs.value_density())
            .then_with(|| lhs.name().cmp(rhs.name()))
    });
    ranked
}

impl Solver for GreedySolver {
    fn solve(&self, instance: &ProblemInstance) -> Result<Solution, SolveError> {
        let started_at = Instant::now();
        let limits = instance.limits();

        let mut spent_cost = 0.0_f64;
        let mut spent_teammates = 0_u64;
        let mut selected = Vec::new();
        for candidate in rank(instance.candidates()) {
            let cost = accumulate(spent_cost, candidate.adjusted_cost());
            let teammates = spent_teammates + u64::from(candidate.required_teammates());
            if limits.admits(cost, teammates) {
                spent_cost = cost;
                spent_teammates = teammates;
                selected.push(candidate.clone());
            } else {
                log::trace!("skipping {:?}: does not fit", candidate.name());
            }
        }

        let solution = Solution::from_selection(selected);
        log::debug!(
            "greedy selected {} of {} candidates in {:?} (objective {:.4})",
            solution.len(),
            instance.candidates().len(),
            started_at.elapsed(),
            solution.objective()
        );
        Ok(solution)
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}

#[expect(clippy::float_arithmetic, reason = "running total of adjusted costs")]
fn accumulate(spent: f64, cost: f64) -> f64 {
    spent + cost
}
