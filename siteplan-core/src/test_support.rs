//! Fixtures shared by unit, behaviour and property tests.

use crate::{
    Candidate, CandidateRecord, CandidateSet, Equipment, InstanceRecord, Limits, ProblemInstance,
    Solution, SolveError, Solver,
};

/// Builds a candidate located at the origin.
///
/// # Panics
///
/// Panics when the attributes fail validation.
#[expect(clippy::panic, reason = "fixtures fail fast on invalid input")]
pub fn candidate(
    name: &str,
    cost: f64,
    overrun_probability: f64,
    required_teammates: u32,
    deal_probability: f64,
) -> Candidate {
    let record = CandidateRecord {
        name: name.to_owned(),
        cost,
        overrun_probability,
        expected_days: 1.0,
        required_teammates,
        deal_probability,
        latitude: 0.0,
        longitude: 0.0,
        equipment: Equipment::default(),
    };
    Candidate::try_from(record).unwrap_or_else(|err| panic!("fixture candidate {name}: {err}"))
}

/// The three-site scenario with a budget of 5000 and five teammates.
///
/// Adjusted costs are A = 1200, B = 1650 and C = 1560; all three together
/// need six teammates.
pub fn sample_record() -> InstanceRecord {
    let site = |name: &str, cost, overrun, days, team, deal, latitude, longitude, kit| {
        CandidateRecord {
            name: name.to_owned(),
            cost,
            overrun_probability: overrun,
            expected_days: days,
            required_teammates: team,
            deal_probability: deal,
            latitude,
            longitude,
            equipment: kit,
        }
    };
    InstanceRecord {
        budget: 5000.0,
        max_teammates: 5,
        candidates: vec![
            site(
                "A",
                1000.0,
                0.2,
                3.0,
                2,
                0.9,
                40.7128,
                -74.0060,
                Equipment {
                    routers: 1,
                    pcs: 2,
                    laptops: 1,
                },
            ),
            site(
                "B",
                1500.0,
                0.1,
                2.0,
                1,
                0.8,
                34.0522,
                -118.2437,
                Equipment {
                    routers: 2,
                    pcs: 1,
                    laptops: 2,
                },
            ),
            site(
                "C",
                1200.0,
                0.3,
                4.0,
                3,
                0.7,
                51.5074,
                -0.1278,
                Equipment {
                    routers: 1,
                    pcs: 3,
                    laptops: 1,
                },
            ),
        ],
    }
}

/// [`sample_record`] validated into an instance.
///
/// # Panics
///
/// Never panics in practice; the fixture data is valid.
#[expect(clippy::panic, reason = "fixtures fail fast on invalid input")]
pub fn sample_instance() -> ProblemInstance {
    ProblemInstance::from_record(sample_record())
        .unwrap_or_else(|err| panic!("sample instance: {err}"))
}

/// Builds an instance from candidates and limits.
///
/// # Panics
///
/// Panics on duplicate names or an invalid budget.
#[expect(clippy::panic, reason = "fixtures fail fast on invalid input")]
pub fn instance(candidates: Vec<Candidate>, budget: f64, max_teammates: u32) -> ProblemInstance {
    let set = CandidateSet::new(candidates).unwrap_or_else(|err| panic!("candidate set: {err}"));
    let limits = Limits::new(budget, max_teammates).unwrap_or_else(|err| panic!("limits: {err}"));
    ProblemInstance::new(set, limits)
}

/// Solver that walks candidates in input order, keeping each one that fits.
#[derive(Debug, Default, Clone, Copy)]
pub struct TakeAllThatFit;

impl Solver for TakeAllThatFit {
    fn solve(&self, instance: &ProblemInstance) -> Result<Solution, SolveError> {
        let mut chosen: Vec<Candidate> = Vec::new();
        for candidate in instance.candidates() {
            let fits = instance
                .limits()
                .fits(chosen.iter().chain(std::iter::once(candidate)));
            if fits {
                chosen.push(candidate.clone());
            }
        }
        Ok(Solution::from_selection(chosen))
    }

    fn name(&self) -> &'static str {
        "take-all-that-fit"
    }
}
