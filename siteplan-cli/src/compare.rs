//! `compare` command: exact and greedy selections side by side.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use siteplan_core::Solver;
use siteplan_solver_exact::ExactSolver;
use siteplan_solver_greedy::GreedySolver;

use crate::files::{emit_report, load_instance, require_existing};
use crate::report::{CompareReport, SelectionReport};
use crate::{ARG_INSTANCE, CliError, ENV_COMPARE_INSTANCE};

/// CLI arguments for the `compare` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Solve an instance with both the exact and the greedy \
                 strategy and report both selections with the optimality gap.",
    about = "Compare exact and greedy selections"
)]
#[ortho_config(prefix = "SITEPLAN")]
pub(crate) struct CompareArgs {
    /// Path to a JSON instance file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) instance_path: Option<Utf8PathBuf>,
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_compare_with(args, &mut stdout)
}

pub(crate) fn run_compare_with(args: CompareArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let instance_path = merged.instance_path.ok_or(CliError::MissingArgument {
        field: ARG_INSTANCE,
        env: ENV_COMPARE_INSTANCE,
    })?;
    require_existing(&instance_path, ARG_INSTANCE)?;
    let report = compare(&instance_path)?;
    emit_report(&report, None, writer)
}

pub(crate) fn compare(instance_path: &Utf8Path) -> Result<CompareReport, CliError> {
    let instance = load_instance(instance_path)?;
    let exact = ExactSolver::new()
        .solve(&instance)
        .map_err(|source| CliError::Solve { source })?;
    let greedy = GreedySolver
        .solve(&instance)
        .map_err(|source| CliError::Solve { source })?;
    let gap = objective_gap(exact.objective(), greedy.objective());
    log::info!(
        "exact {:.4} vs greedy {:.4} (gap {gap:.4})",
        exact.objective(),
        greedy.objective()
    );
    Ok(CompareReport {
        exact: SelectionReport::from(&exact),
        greedy: SelectionReport::from(&greedy),
        gap,
    })
}

#[expect(clippy::float_arithmetic, reason = "gap between two objectives")]
fn objective_gap(exact: f64, greedy: f64) -> f64 {
    (exact - greedy).max(0.0)
}
