//! `plan` command: solve an instance and replay failure events.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use siteplan_core::{Fallback, RecordingRenderer, ReoptimizationController, Solver};
use siteplan_solver_exact::{ExactSolver, ExactSolverConfig};
use siteplan_solver_greedy::GreedySolver;

use crate::files::{emit_report, load_instance, require_existing};
use crate::report::{PlanReport, ReoptimizationReport, SelectionReport};
use crate::{
    ARG_FAIL, ARG_FALLBACK, ARG_INSTANCE, ARG_MAX_NODES, ARG_OUTPUT, ARG_STRATEGY,
    ARG_TIME_LIMIT_MS, CliError, ENV_PLAN_INSTANCE,
};

/// Solving strategy selectable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Strategy {
    /// Branch and bound with a proven optimum.
    #[default]
    Exact,
    /// Value-density heuristic.
    Greedy,
    /// External MILP backend.
    Milp,
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Solve a site-selection instance, then apply each --fail \
                 event in order and re-optimise over the remaining \
                 candidates. Options can come from CLI flags, configuration \
                 files, or environment variables.",
    about = "Solve an instance and replay site failures"
)]
#[ortho_config(prefix = "SITEPLAN")]
pub(crate) struct PlanArgs {
    /// Path to a JSON instance file.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) instance_path: Option<Utf8PathBuf>,
    /// Solving strategy (default: exact).
    #[arg(long = ARG_STRATEGY, value_enum)]
    #[serde(default)]
    pub(crate) strategy: Option<Strategy>,
    /// Fall back to the greedy solver when the chosen solver times out.
    #[arg(long = ARG_FALLBACK)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) fallback: bool,
    /// Candidate to mark unavailable; repeat to replay several failures.
    #[arg(long = ARG_FAIL, value_name = "name")]
    #[serde(default)]
    pub(crate) fail: Vec<String>,
    /// Node limit for the exact solver.
    #[arg(long = ARG_MAX_NODES, value_name = "count")]
    #[serde(default)]
    pub(crate) max_nodes: Option<u64>,
    /// Wall-clock limit per solve, in milliseconds.
    #[arg(long = ARG_TIME_LIMIT_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) time_limit_ms: Option<u64>,
    /// Write the report here instead of standard output.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    pub(crate) instance_path: Utf8PathBuf,
    pub(crate) strategy: Strategy,
    pub(crate) fallback: bool,
    pub(crate) failures: Vec<String>,
    pub(crate) exact: ExactSolverConfig,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.instance_path, ARG_INSTANCE)
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let instance_path = args.instance_path.ok_or(CliError::MissingArgument {
            field: ARG_INSTANCE,
            env: ENV_PLAN_INSTANCE,
        })?;
        let defaults = ExactSolverConfig::default();
        let exact = ExactSolverConfig {
            max_nodes: args.max_nodes.unwrap_or(defaults.max_nodes),
            time_limit: args
                .time_limit_ms
                .map_or(defaults.time_limit, Duration::from_millis),
        };
        Ok(Self {
            instance_path,
            strategy: args.strategy.unwrap_or_default(),
            fallback: args.fallback,
            failures: args.fail,
            exact,
            output: args.output,
        })
    }
}

/// Builds the solver for a plan invocation.
pub(crate) trait PlanSolverBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Solver>, CliError>;
}

pub(crate) struct DefaultPlanSolverBuilder;

impl PlanSolverBuilder for DefaultPlanSolverBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Solver>, CliError> {
        let primary: Box<dyn Solver> = match config.strategy {
            Strategy::Greedy => return Ok(Box::new(GreedySolver)),
            Strategy::Exact => Box::new(ExactSolver::with_config(config.exact)),
            Strategy::Milp => milp_solver(config)?,
        };
        if config.fallback {
            Ok(Box::new(Fallback::new(primary, GreedySolver)))
        } else {
            Ok(primary)
        }
    }
}

#[cfg(feature = "solver-milp")]
fn milp_solver(config: &PlanConfig) -> Result<Box<dyn Solver>, CliError> {
    use siteplan_solver_milp::{MilpSolver, MilpSolverConfig};

    Ok(Box::new(MilpSolver::with_config(MilpSolverConfig {
        time_limit: config.exact.time_limit,
    })))
}

#[cfg(not(feature = "solver-milp"))]
fn milp_solver(_config: &PlanConfig) -> Result<Box<dyn Solver>, CliError> {
    Err(CliError::MissingFeature {
        feature: "solver-milp",
        action: "--strategy milp",
    })
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &DefaultPlanSolverBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlanSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let report = execute_plan(&config, builder)?;
    emit_report(&report, config.output.as_deref(), writer)
}

pub(crate) fn execute_plan(
    config: &PlanConfig,
    builder: &dyn PlanSolverBuilder,
) -> Result<PlanReport, CliError> {
    let instance = load_instance(&config.instance_path)?;
    let solver = builder.build(config)?;
    let strategy = solver.name().to_owned();
    let limits = *instance.limits();

    let mut controller =
        ReoptimizationController::new(instance, solver, RecordingRenderer::default())
            .map_err(|source| CliError::Solve { source })?;
    let initial = SelectionReport::from(controller.solution());

    let mut reoptimizations = Vec::with_capacity(config.failures.len());
    for name in &config.failures {
        controller
            .candidate_failed(name)
            .map_err(|source| CliError::Reoptimize {
                name: name.clone(),
                source,
            })?;
        let payload = controller.renderer().last().cloned().unwrap_or_default();
        reoptimizations.push(ReoptimizationReport {
            failed: name.clone(),
            selection: SelectionReport::new(controller.solution(), payload),
        });
    }

    Ok(PlanReport {
        strategy,
        budget: limits.budget(),
        max_teammates: limits.max_teammates(),
        initial,
        reoptimizations,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
