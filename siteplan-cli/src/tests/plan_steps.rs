//! Behaviour-driven step definitions driving the plan CLI scenarios.

use super::helpers::{workspace, write_sample_instance};
use super::*;
use crate::plan::{DefaultPlanSolverBuilder, run_plan_with};
use crate::report::PlanReport;
use camino::Utf8PathBuf;
use clap::Parser;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use siteplan_core::ReoptimizeError;
use std::cell::RefCell;
use tempfile::TempDir;

#[derive(Debug)]
struct PlanWorld {
    _tmp: TempDir,
    instance_path: Utf8PathBuf,
    output_path: Utf8PathBuf,
    include_instance: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl PlanWorld {
    fn new() -> Self {
        let (tmp, root) = workspace();
        Self {
            _tmp: tmp,
            instance_path: root.join("instance.json"),
            output_path: root.join("reports/plan.json"),
            include_instance: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self) -> Vec<String> {
        let mut argv = vec!["siteplan".to_owned(), "plan".to_owned()];
        if *self.include_instance.borrow() {
            argv.push(self.instance_path.as_str().to_owned());
        }
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn report(&self) -> PlanReport {
        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        serde_json::from_str(&stdout).expect("output should be a JSON plan report")
    }

    fn error(&self) -> CliError {
        self.result
            .take()
            .expect("result recorded")
            .expect_err("expected failure")
    }
}

#[fixture]
fn world() -> PlanWorld {
    PlanWorld::new()
}

#[given("the three-site instance file exists")]
fn instance_file_exists(#[from(world)] world: &PlanWorld) {
    write_sample_instance(&world.instance_path);
}

#[given("I report that site A failed")]
fn report_a_failed(#[from(world)] world: &PlanWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_FAIL}"), "A".to_owned()]);
}

#[given("I report that site Z failed")]
fn report_z_failed(#[from(world)] world: &PlanWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_FAIL}"), "Z".to_owned()]);
}

#[given("I omit the instance path")]
fn omit_instance_path(#[from(world)] world: &PlanWorld) {
    *world.include_instance.borrow_mut() = false;
}

#[given("I ask for the report to be written to a file")]
fn request_output_file(#[from(world)] world: &PlanWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_OUTPUT}"), world.output_path.to_string()]);
}

#[when("I run the plan command")]
fn run_plan_command(#[from(world)] world: &PlanWorld) {
    let invocation = world.build_command_line();
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Plan(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_plan_with(args, &DefaultPlanSolverBuilder, &mut *buffer)
        }
        Command::Compare(_) => panic!("expected plan command"),
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds")]
fn command_succeeds(#[from(world)] world: &PlanWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    if let Err(err) = result {
        panic!("expected success, found {err:?}");
    }
}

#[then("the initial selection is A and B")]
fn initial_selection_is_a_b(#[from(world)] world: &PlanWorld) {
    assert_eq!(world.report().initial.selected, ["A", "B"]);
}

#[then("the re-optimised selection is B and C")]
fn reoptimised_selection_is_b_c(#[from(world)] world: &PlanWorld) {
    let report = world.report();
    let last = report.reoptimizations.last().expect("one re-optimisation");
    assert_eq!(last.failed, "A");
    assert_eq!(last.selection.selected, ["B", "C"]);
}

#[then("the map is centred on site B")]
fn map_centred_on_b(#[from(world)] world: &PlanWorld) {
    let report = world.report();
    let last = report.reoptimizations.last().expect("one re-optimisation");
    let centre = last.selection.map.payload.centre.as_ref().expect("centre");
    assert_eq!(centre.name, "B");
    assert_eq!(
        last.selection.map.centre_url.as_deref(),
        Some("https://www.openstreetmap.org/?mlat=34.0522&mlon=-118.2437")
    );
}

#[then("the command fails because the site is unknown")]
fn command_fails_unknown_site(#[from(world)] world: &PlanWorld) {
    match world.error() {
        CliError::Reoptimize {
            source: ReoptimizeError::UnknownCandidate { name },
            ..
        } => assert_eq!(name, "Z"),
        other => panic!("expected unknown candidate, found {other:?}"),
    }
}

#[then("the command fails because the instance path is missing")]
fn command_fails_missing_instance(#[from(world)] world: &PlanWorld) {
    match world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(field, ARG_INSTANCE),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the report file holds the initial selection")]
fn report_file_holds_selection(#[from(world)] world: &PlanWorld) {
    let written =
        std::fs::read_to_string(world.output_path.as_std_path()).expect("report written");
    let report: PlanReport = serde_json::from_str(&written).expect("report is JSON");
    assert_eq!(report.initial.selected, ["A", "B"]);
}

#[then("nothing is printed")]
fn nothing_printed(#[from(world)] world: &PlanWorld) {
    assert!(world.stdout.borrow().is_empty());
}

macro_rules! register_plan_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/plan_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: PlanWorld) {
            let _ = world;
        }
    };
}

register_plan_scenario!(plan_happy_path, "planning the three-site instance");
register_plan_scenario!(plan_replays_failure, "replaying the failure of site A");
register_plan_scenario!(plan_unknown_failure, "rejecting an unknown failed site");
register_plan_scenario!(plan_missing_instance, "rejecting a missing instance path");
register_plan_scenario!(plan_output_file, "writing the report to a file");
