//! Candidate collections, resource limits and problem instances.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::{Candidate, CandidateError, CandidateRecord, Solution};

/// Errors raised while assembling a [`CandidateSet`] or [`ProblemInstance`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstanceError {
    /// A candidate's attributes were outside their valid domain.
    #[error("invalid candidate {name:?}: {source}")]
    InvalidCandidate {
        /// Name of the rejected candidate, possibly empty.
        name: String,
        /// Underlying validation failure.
        #[source]
        source: CandidateError,
    },
    /// Two candidates shared a name.
    #[error("candidate {name:?} appears more than once")]
    DuplicateCandidate {
        /// Duplicated name.
        name: String,
    },
    /// The budget was negative, NaN or infinite.
    #[error("budget must be a finite, non-negative number (got {value})")]
    InvalidBudget {
        /// Rejected budget.
        value: f64,
    },
}

/// Budget and headcount available to a selection round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    budget: f64,
    max_teammates: u32,
}

impl Limits {
    /// Validates and constructs [`Limits`].
    pub fn new(budget: f64, max_teammates: u32) -> Result<Self, InstanceError> {
        if !budget.is_finite() || budget < 0.0 {
            return Err(InstanceError::InvalidBudget { value: budget });
        }
        Ok(Self {
            budget,
            max_teammates,
        })
    }

    /// Total adjusted cost that may be spent.
    pub const fn budget(&self) -> f64 {
        self.budget
    }

    /// Total headcount that may be assigned.
    pub const fn max_teammates(&self) -> u32 {
        self.max_teammates
    }

    /// Returns `true` when the given totals stay within both limits.
    ///
    /// The budget comparison is exact: a total one rounding step above the
    /// budget is rejected.
    #[must_use]
    pub fn admits(&self, adjusted_cost: f64, teammates: u64) -> bool {
        teammates <= u64::from(self.max_teammates) && adjusted_cost <= self.budget
    }

    /// Returns `true` when the combined subset stays within both limits.
    pub fn fits<'a, I>(&self, subset: I) -> bool
    where
        I: IntoIterator<Item = &'a Candidate>,
    {
        let (cost, teammates) = subset
            .into_iter()
            .fold((0.0_f64, 0_u64), |(cost, team), candidate| {
                (
                    sum_cost(cost, candidate.adjusted_cost()),
                    team + u64::from(candidate.required_teammates()),
                )
            });
        self.admits(cost, teammates)
    }
}

#[expect(clippy::float_arithmetic, reason = "accumulating adjusted costs")]
fn sum_cost(acc: f64, cost: f64) -> f64 {
    acc + cost
}

/// A validated collection of uniquely named candidates.
///
/// Input order is preserved; lookups by name go through an index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
    index: HashMap<String, usize>,
}

impl CandidateSet {
    /// Builds a set from already validated candidates.
    pub fn new<I>(candidates: I) -> Result<Self, InstanceError>
    where
        I: IntoIterator<Item = Candidate>,
    {
        let mut set = Self::default();
        for candidate in candidates {
            let name = candidate.name().to_owned();
            if set.index.contains_key(&name) {
                return Err(InstanceError::DuplicateCandidate { name });
            }
            set.index.insert(name, set.candidates.len());
            set.candidates.push(candidate);
        }
        Ok(set)
    }

    /// Validates raw records and builds a set from them.
    pub fn from_records<I>(records: I) -> Result<Self, InstanceError>
    where
        I: IntoIterator<Item = CandidateRecord>,
    {
        let candidates = records
            .into_iter()
            .map(|record| {
                let name = record.name.clone();
                Candidate::try_from(record)
                    .map_err(|source| InstanceError::InvalidCandidate { name, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(candidates)
    }

    /// Iterates candidates in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    /// Candidates in input order.
    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Number of candidates.
    pub const fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns `true` when the set holds no candidates.
    pub const fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Looks a candidate up by name.
    pub fn get(&self, name: &str) -> Option<&Candidate> {
        self.index
            .get(name)
            .and_then(|&position| self.candidates.get(position))
    }

    /// Returns `true` when a candidate with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns a copy of the set with the named candidate removed.
    ///
    /// Returns `None` when no candidate has that name.
    #[must_use]
    pub fn without(&self, name: &str) -> Option<Self> {
        if !self.contains(name) {
            return None;
        }
        let candidates: Vec<Candidate> = self
            .candidates
            .iter()
            .filter(|candidate| candidate.name() != name)
            .cloned()
            .collect();
        let index = candidates
            .iter()
            .enumerate()
            .map(|(position, candidate)| (candidate.name().to_owned(), position))
            .collect();
        Some(Self { candidates, index })
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Serialisable description of a whole selection round.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceRecord {
    /// Budget available for adjusted costs.
    pub budget: f64,
    /// Headcount available for selected sites.
    pub max_teammates: u32,
    /// Candidate sites.
    pub candidates: Vec<CandidateRecord>,
}

/// A self-contained snapshot of one selection round.
///
/// # Examples
///
/// ```
/// use siteplan_core::{CandidateSet, Limits, ProblemInstance};
///
/// # fn main() -> Result<(), siteplan_core::InstanceError> {
/// let instance = ProblemInstance::new(CandidateSet::default(), Limits::new(100.0, 2)?);
/// assert!(instance.candidates().is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemInstance {
    candidates: CandidateSet,
    limits: Limits,
}

impl ProblemInstance {
    /// Combines a candidate set with its limits.
    pub const fn new(candidates: CandidateSet, limits: Limits) -> Self {
        Self { candidates, limits }
    }

    /// Validates an [`InstanceRecord`] into an instance.
    pub fn from_record(record: InstanceRecord) -> Result<Self, InstanceError> {
        let limits = Limits::new(record.budget, record.max_teammates)?;
        let candidates = CandidateSet::from_records(record.candidates)?;
        Ok(Self::new(candidates, limits))
    }

    /// Candidates available in this round.
    pub const fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Budget and headcount for this round.
    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Returns the instance left after removing the named candidate.
    ///
    /// Returns `None` when the candidate is not part of this instance.
    #[must_use]
    pub fn without(&self, name: &str) -> Option<Self> {
        self.candidates
            .without(name)
            .map(|candidates| Self::new(candidates, self.limits))
    }

    /// Returns `true` when `solution` is a feasible subset of this instance.
    ///
    /// Every selected candidate must belong to the instance, appear once,
    /// and the totals must respect both limits.
    pub fn fits(&self, solution: &Solution) -> bool {
        let mut seen = HashSet::new();
        let members_valid = solution.selected().iter().all(|candidate| {
            self.candidates.get(candidate.name()) == Some(candidate)
                && seen.insert(candidate.name())
        });
        members_valid && self.limits.fits(solution.selected())
    }
}
