#![expect(clippy::expect_used, reason = "behaviour tests use expect for readable failures")]

//! Behavioural coverage for candidate validation and instance assembly.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use siteplan_core::{
    CandidateError, CandidateRecord, Equipment, InstanceError, InstanceRecord, ProblemInstance,
};

#[derive(Debug, Default)]
struct InstanceWorld {
    record: RefCell<Option<InstanceRecord>>,
    result: RefCell<Option<Result<ProblemInstance, InstanceError>>>,
    reduced: RefCell<Option<ProblemInstance>>,
}

#[fixture]
fn world() -> InstanceWorld {
    InstanceWorld::default()
}

fn site(name: &str, cost: f64, overrun: f64, team: u32, deal: f64) -> CandidateRecord {
    CandidateRecord {
        name: name.to_owned(),
        cost,
        overrun_probability: overrun,
        expected_days: 2.0,
        required_teammates: team,
        deal_probability: deal,
        latitude: 0.0,
        longitude: 0.0,
        equipment: Equipment::default(),
    }
}

fn edit_candidate(world: &InstanceWorld, name: &str, edit: impl FnOnce(&mut CandidateRecord)) {
    let mut record = world.record.borrow_mut();
    let candidate = record
        .as_mut()
        .and_then(|r| r.candidates.iter_mut().find(|c| c.name == name))
        .expect("candidate should exist in the record");
    edit(candidate);
}

fn built(world: &InstanceWorld) -> ProblemInstance {
    world
        .result
        .borrow()
        .clone()
        .expect("instance should have been built")
        .expect("instance should be valid")
}

fn build_error(world: &InstanceWorld) -> InstanceError {
    world
        .result
        .borrow()
        .clone()
        .expect("instance should have been built")
        .expect_err("instance should be rejected")
}

#[given("the three-site records with a budget of 5000 and five teammates")]
fn given_sample_records(world: &InstanceWorld) {
    world.record.replace(Some(InstanceRecord {
        budget: 5000.0,
        max_teammates: 5,
        candidates: vec![
            site("A", 1000.0, 0.2, 2, 0.9),
            site("B", 1500.0, 0.1, 1, 0.8),
            site("C", 1200.0, 0.3, 3, 0.7),
        ],
    }));
}

#[given("candidate B has a deal probability of 1.5")]
fn given_invalid_deal(world: &InstanceWorld) {
    edit_candidate(world, "B", |c| c.deal_probability = 1.5);
}

#[given("candidate C is renamed to A")]
fn given_duplicate(world: &InstanceWorld) {
    edit_candidate(world, "C", |c| c.name = "A".to_owned());
}

#[when("I build the problem instance")]
fn when_build(world: &InstanceWorld) {
    let record = world
        .record
        .borrow()
        .clone()
        .expect("record should be prepared");
    world
        .result
        .replace(Some(ProblemInstance::from_record(record)));
}

#[when("I remove candidate A")]
fn when_remove(world: &InstanceWorld) {
    let reduced = built(world).without("A");
    world.reduced.replace(reduced);
}

#[then("the instance holds three candidates")]
fn then_three(world: &InstanceWorld) {
    assert_eq!(built(world).candidates().len(), 3);
}

#[then("candidate A has an adjusted cost of 1200")]
fn then_adjusted(world: &InstanceWorld) {
    let instance = built(world);
    let a = instance.candidates().get("A").expect("A should exist");
    assert!((a.adjusted_cost() - 1200.0).abs() < 1e-9);
}

#[then("an invalid candidate error names B")]
fn then_invalid(world: &InstanceWorld) {
    match build_error(world) {
        InstanceError::InvalidCandidate { name, source } => {
            assert_eq!(name, "B");
            assert!(matches!(
                source,
                CandidateError::ProbabilityOutOfRange {
                    field: "deal_probability",
                    ..
                }
            ));
        }
        other => panic!("expected InvalidCandidate, found {other:?}"),
    }
}

#[then("a duplicate candidate error names A")]
fn then_duplicate(world: &InstanceWorld) {
    assert_eq!(
        build_error(world),
        InstanceError::DuplicateCandidate {
            name: "A".to_owned()
        }
    );
}

#[then("the reduced instance holds B and C")]
fn then_reduced(world: &InstanceWorld) {
    let reduced = world.reduced.borrow();
    let instance = reduced.as_ref().expect("reduced instance should exist");
    let names: Vec<&str> = instance.candidates().iter().map(|c| c.name()).collect();
    assert_eq!(names, ["B", "C"]);
    assert_eq!(instance.limits().max_teammates(), 5);
}

#[scenario(path = "tests/features/candidate_set.feature", index = 0)]
fn valid_candidates(world: InstanceWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/candidate_set.feature", index = 1)]
fn invalid_deal_probability(world: InstanceWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/candidate_set.feature", index = 2)]
fn duplicate_names(world: InstanceWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/candidate_set.feature", index = 3)]
fn removing_candidate(world: InstanceWorld) {
    let _ = world;
}
