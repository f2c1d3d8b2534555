//! Selected subsets and their aggregate totals.

use crate::Candidate;

/// A subset of candidates chosen by a solver.
///
/// Candidates are kept in selection order. Totals are computed once at
/// construction so callers can report them without re-summing.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Solution {
    selected: Vec<Candidate>,
    objective: f64,
    total_adjusted_cost: f64,
    total_teammates: u64,
}

impl Solution {
    /// The empty selection, which is feasible for every instance.
    pub const fn empty() -> Self {
        Self {
            selected: Vec::new(),
            objective: 0.0,
            total_adjusted_cost: 0.0,
            total_teammates: 0,
        }
    }

    /// Wraps an ordered selection and computes its totals.
    ///
    /// The caller is responsible for feasibility; see
    /// [`ProblemInstance::fits`](crate::ProblemInstance::fits).
    pub fn from_selection(selected: Vec<Candidate>) -> Self {
        let objective = selected.iter().map(Candidate::deal_probability).sum();
        let total_adjusted_cost = selected.iter().map(Candidate::adjusted_cost).sum();
        let total_teammates = selected
            .iter()
            .map(|candidate| u64::from(candidate.required_teammates()))
            .sum();
        Self {
            selected,
            objective,
            total_adjusted_cost,
            total_teammates,
        }
    }

    /// Selected candidates in selection order.
    pub fn selected(&self) -> &[Candidate] {
        &self.selected
    }

    /// Names of the selected candidates in selection order.
    pub fn names(&self) -> Vec<&str> {
        self.selected.iter().map(Candidate::name).collect()
    }

    /// Returns `true` when the named candidate was selected.
    pub fn contains(&self, name: &str) -> bool {
        self.selected.iter().any(|candidate| candidate.name() == name)
    }

    /// Number of selected candidates.
    pub const fn len(&self) -> usize {
        self.selected.len()
    }

    /// Returns `true` when nothing was selected.
    pub const fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// First selected candidate, used for map centring.
    pub fn first(&self) -> Option<&Candidate> {
        self.selected.first()
    }

    /// Sum of deal probabilities.
    pub const fn objective(&self) -> f64 {
        self.objective
    }

    /// Sum of adjusted costs.
    pub const fn total_adjusted_cost(&self) -> f64 {
        self.total_adjusted_cost
    }

    /// Sum of required teammates.
    pub const fn total_teammates(&self) -> u64 {
        self.total_teammates
    }

    /// `(latitude, longitude)` pairs in selection order.
    pub fn coordinates(&self) -> Vec<(f64, f64)> {
        self.selected
            .iter()
            .map(|candidate| (candidate.latitude(), candidate.longitude()))
            .collect()
    }
}
