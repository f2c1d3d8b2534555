//! Candidate sites and the validation applied to their raw attributes.

use geo::Coord;
use thiserror::Error;

/// Equipment counts recorded against a site.
///
/// These are carried through for reporting only and never influence
/// selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    /// Routers needed on site.
    pub routers: u32,
    /// Desktop PCs needed on site.
    pub pcs: u32,
    /// Laptops needed on site.
    pub laptops: u32,
}

/// Raw candidate attributes as supplied by the input collaborator.
///
/// Records are unvalidated; convert them with [`Candidate::try_from`] before
/// handing them to a solver.
///
/// # Examples
///
/// ```
/// use siteplan_core::{Candidate, CandidateRecord};
///
/// let record = CandidateRecord {
///     name: "A".to_owned(),
///     cost: 1000.0,
///     overrun_probability: 0.2,
///     expected_days: 3.0,
///     required_teammates: 2,
///     deal_probability: 0.9,
///     latitude: 40.7128,
///     longitude: -74.0060,
///     equipment: Default::default(),
/// };
/// let candidate = Candidate::try_from(record).expect("valid candidate");
/// assert!((candidate.adjusted_cost() - 1200.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateRecord {
    /// Unique site identifier.
    pub name: String,
    /// Nominal monetary cost.
    pub cost: f64,
    /// Probability that the cost exceeds its nominal value.
    pub overrun_probability: f64,
    /// Expected duration of the engagement in days. Informational only.
    pub expected_days: f64,
    /// Headcount consumed when the site is selected.
    pub required_teammates: u32,
    /// Expected payoff contributed when the site is selected.
    pub deal_probability: f64,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Equipment requirements. Informational only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Equipment,
}

/// Errors returned when a [`CandidateRecord`] fails validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CandidateError {
    /// The candidate name was empty or whitespace.
    #[error("candidate name must not be empty")]
    EmptyName,
    /// A quantity was negative, NaN or infinite.
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidQuantity {
        /// Offending attribute.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A probability fell outside `[0, 1]`.
    #[error("{field} must lie within [0, 1] (got {value})")]
    ProbabilityOutOfRange {
        /// Offending attribute.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// A coordinate was NaN or infinite.
    #[error("{field} must be finite (got {value})")]
    NonFiniteCoordinate {
        /// Offending attribute.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// A validated candidate site.
///
/// Candidates are immutable once constructed; a selection round works on
/// shared references and never edits them in place.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "CandidateRecord", try_from = "CandidateRecord")
)]
pub struct Candidate {
    name: String,
    cost: f64,
    overrun_probability: f64,
    expected_days: f64,
    required_teammates: u32,
    deal_probability: f64,
    location: Coord<f64>,
    equipment: Equipment,
}

impl Candidate {
    /// Site identifier, unique within a [`CandidateSet`](crate::CandidateSet).
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Nominal cost before risk adjustment.
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Probability that the nominal cost is exceeded.
    pub const fn overrun_probability(&self) -> f64 {
        self.overrun_probability
    }

    /// Expected engagement length in days.
    pub const fn expected_days(&self) -> f64 {
        self.expected_days
    }

    /// Headcount consumed when selected.
    pub const fn required_teammates(&self) -> u32 {
        self.required_teammates
    }

    /// Objective coefficient contributed when selected.
    pub const fn deal_probability(&self) -> f64 {
        self.deal_probability
    }

    /// Position with `x` as longitude and `y` as latitude.
    pub const fn location(&self) -> Coord<f64> {
        self.location
    }

    /// Latitude in decimal degrees.
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in decimal degrees.
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Informational equipment counts.
    pub const fn equipment(&self) -> Equipment {
        self.equipment
    }

    /// Cost inflated by its overrun probability.
    ///
    /// This is the only cost figure used by feasibility checks.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "risk adjustment scales the nominal cost")]
    pub fn adjusted_cost(&self) -> f64 {
        self.cost * (1.0 + self.overrun_probability)
    }

    /// Deal probability per unit of adjusted cost.
    ///
    /// Free sites with a positive payoff rank above everything else; free
    /// sites with no payoff have zero density.
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "density is a ratio of floats")]
    pub fn value_density(&self) -> f64 {
        let adjusted = self.adjusted_cost();
        if adjusted > 0.0 {
            self.deal_probability / adjusted
        } else if self.deal_probability > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    }
}

impl TryFrom<CandidateRecord> for Candidate {
    type Error = CandidateError;

    fn try_from(record: CandidateRecord) -> Result<Self, Self::Error> {
        if record.name.trim().is_empty() {
            return Err(CandidateError::EmptyName);
        }
        let cost = quantity("cost", record.cost)?;
        let expected_days = quantity("expected_days", record.expected_days)?;
        let overrun_probability = probability("overrun_probability", record.overrun_probability)?;
        let deal_probability = probability("deal_probability", record.deal_probability)?;
        let latitude = coordinate("latitude", record.latitude)?;
        let longitude = coordinate("longitude", record.longitude)?;
        Ok(Self {
            name: record.name,
            cost,
            overrun_probability,
            expected_days,
            required_teammates: record.required_teammates,
            deal_probability,
            location: Coord {
                x: longitude,
                y: latitude,
            },
            equipment: record.equipment,
        })
    }
}

impl From<Candidate> for CandidateRecord {
    fn from(candidate: Candidate) -> Self {
        Self {
            latitude: candidate.latitude(),
            longitude: candidate.longitude(),
            name: candidate.name,
            cost: candidate.cost,
            overrun_probability: candidate.overrun_probability,
            expected_days: candidate.expected_days,
            required_teammates: candidate.required_teammates,
            deal_probability: candidate.deal_probability,
            equipment: candidate.equipment,
        }
    }
}

fn quantity(field: &'static str, value: f64) -> Result<f64, CandidateError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(CandidateError::InvalidQuantity { field, value })
    }
}

fn probability(field: &'static str, value: f64) -> Result<f64, CandidateError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(CandidateError::ProbabilityOutOfRange { field, value })
    }
}

fn coordinate(field: &'static str, value: f64) -> Result<f64, CandidateError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CandidateError::NonFiniteCoordinate { field, value })
    }
}
