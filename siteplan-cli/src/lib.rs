//! Command-line interface for planning site selections.
//!
//! `siteplan plan` solves a JSON instance, replays failure events through
//! the re-optimisation controller and reports every map payload.
//! `siteplan compare` solves the same instance exactly and greedily and
//! reports the optimality gap.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod compare;
mod error;
mod files;
mod plan;
mod report;

pub use error::CliError;

use compare::{CompareArgs, run_compare};
use plan::{PlanArgs, run_plan};

const ARG_INSTANCE: &str = "instance";
const ARG_STRATEGY: &str = "strategy";
const ARG_FALLBACK: &str = "fallback";
const ARG_FAIL: &str = "fail";
const ARG_MAX_NODES: &str = "max-nodes";
const ARG_TIME_LIMIT_MS: &str = "time-limit-ms";
const ARG_OUTPUT: &str = "output";
const ENV_PLAN_INSTANCE: &str = "SITEPLAN_CMDS_PLAN_INSTANCE_PATH";
const ENV_COMPARE_INSTANCE: &str = "SITEPLAN_CMDS_COMPARE_INSTANCE_PATH";

/// Run the CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
        Command::Compare(args) => run_compare(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "siteplan",
    about = "Choose which candidate sites to pursue under budget and headcount limits",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve an instance and replay site failures.
    Plan(PlanArgs),
    /// Compare the exact and greedy selections for an instance.
    Compare(CompareArgs),
}

#[cfg(test)]
mod tests;
