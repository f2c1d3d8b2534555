//! JSON reports printed by the subcommands.

use serde::{Deserialize, Serialize};
use siteplan_core::{MapPayload, Solution};

/// Map data for one selection, ready for the rendering collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct MapReport {
    /// `lat,lon` pairs joined by `|`.
    pub(crate) delimited: String,
    /// Marker link for the first selected site.
    pub(crate) centre_url: Option<String>,
    /// Structured payload.
    pub(crate) payload: MapPayload,
}

impl From<MapPayload> for MapReport {
    fn from(payload: MapPayload) -> Self {
        Self {
            delimited: payload.delimited(),
            centre_url: payload.centre_url(),
            payload,
        }
    }
}

/// Summary of one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SelectionReport {
    pub(crate) selected: Vec<String>,
    pub(crate) objective: f64,
    pub(crate) total_adjusted_cost: f64,
    pub(crate) total_teammates: u64,
    pub(crate) map: MapReport,
}

impl SelectionReport {
    /// Summarises `solution` with the payload already rendered for it.
    pub(crate) fn new(solution: &Solution, payload: MapPayload) -> Self {
        Self {
            selected: solution.names().into_iter().map(str::to_owned).collect(),
            objective: solution.objective(),
            total_adjusted_cost: solution.total_adjusted_cost(),
            total_teammates: solution.total_teammates(),
            map: MapReport::from(payload),
        }
    }
}

impl From<&Solution> for SelectionReport {
    fn from(solution: &Solution) -> Self {
        Self::new(solution, MapPayload::from_solution(solution))
    }
}

/// Selection after one failure event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ReoptimizationReport {
    /// Candidate that became unavailable.
    pub(crate) failed: String,
    pub(crate) selection: SelectionReport,
}

/// Output of `siteplan plan`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlanReport {
    /// Solver label, as reported by the solver itself.
    pub(crate) strategy: String,
    pub(crate) budget: f64,
    pub(crate) max_teammates: u32,
    pub(crate) initial: SelectionReport,
    pub(crate) reoptimizations: Vec<ReoptimizationReport>,
}

/// Output of `siteplan compare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CompareReport {
    pub(crate) exact: SelectionReport,
    pub(crate) greedy: SelectionReport,
    /// Exact objective minus greedy objective; never negative.
    pub(crate) gap: f64,
}
