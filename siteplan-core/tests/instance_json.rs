//! Decoding instances from the JSON shape supplied by the input collaborator.
#![cfg(feature = "serde")]
#![expect(
    clippy::expect_used,
    clippy::indexing_slicing,
    reason = "decoding tests expect valid fixtures and index JSON values"
)]

use rstest::rstest;
use siteplan_core::{Equipment, InstanceError, InstanceRecord, ProblemInstance};

const INSTANCE: &str = r#"{
    "budget": 5000,
    "max_teammates": 5,
    "candidates": [
        {
            "name": "A", "cost": 1000, "overrun_probability": 0.2, "expected_days": 3,
            "required_teammates": 2, "deal_probability": 0.9,
            "latitude": 40.7128, "longitude": -74.006,
            "equipment": { "routers": 1, "pcs": 2, "laptops": 1 }
        },
        {
            "name": "B", "cost": 1500, "overrun_probability": 0.1, "expected_days": 2,
            "required_teammates": 1, "deal_probability": 0.8,
            "latitude": 34.0522, "longitude": -118.2437
        }
    ]
}"#;

#[rstest]
fn decodes_instance_with_optional_equipment() {
    let record: InstanceRecord = serde_json::from_str(INSTANCE).expect("valid JSON");
    let instance = ProblemInstance::from_record(record).expect("valid instance");

    let a = instance.candidates().get("A").expect("A present");
    assert_eq!(
        a.equipment(),
        Equipment {
            routers: 1,
            pcs: 2,
            laptops: 1
        }
    );
    let b = instance.candidates().get("B").expect("B present");
    assert_eq!(b.equipment(), Equipment::default());
    assert_eq!(instance.limits().max_teammates(), 5);
}

#[rstest]
fn negative_teammates_fail_to_decode() {
    let payload = INSTANCE.replace("\"required_teammates\": 1", "\"required_teammates\": -1");
    assert!(serde_json::from_str::<InstanceRecord>(&payload).is_err());
}

#[rstest]
fn negative_budget_is_rejected() {
    let payload = INSTANCE.replace("\"budget\": 5000", "\"budget\": -1");
    let record: InstanceRecord = serde_json::from_str(&payload).expect("valid JSON");
    assert_eq!(
        ProblemInstance::from_record(record),
        Err(InstanceError::InvalidBudget { value: -1.0 })
    );
}

#[rstest]
fn candidates_serialise_as_records() {
    let record: InstanceRecord = serde_json::from_str(INSTANCE).expect("valid JSON");
    let instance = ProblemInstance::from_record(record).expect("valid instance");
    let a = instance.candidates().get("A").expect("A present");
    let value = serde_json::to_value(a).expect("serialise candidate");
    assert_eq!(value["name"], "A");
    assert_eq!(value["required_teammates"], 2);
    assert_eq!(value["equipment"]["pcs"], 2);
}
