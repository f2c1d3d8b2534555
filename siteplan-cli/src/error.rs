//! Error types emitted by the siteplan CLI.
//!
//! Keep this error type reasonably small, as CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use siteplan_core::{InstanceError, ReoptimizeError, SolveError};
use thiserror::Error;

/// Errors emitted by the siteplan CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (pass it on the command line or set {env})")]
    MissingArgument {
        /// Argument name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The requested operation requires a missing compile-time feature.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        /// Cargo feature that provides the operation.
        feature: &'static str,
        /// What the user asked for.
        action: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Argument name.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Argument name.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Argument name.
        field: &'static str,
        /// Path as given.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Reading the instance file failed.
    #[error("failed to read instance at {path:?}: {source}")]
    ReadInstance {
        /// Instance path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Instance JSON could not be decoded.
    #[error("failed to parse instance JSON at {path:?}: {source}")]
    ParseInstance {
        /// Instance path.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The decoded instance failed validation.
    #[error("instance in {path:?} failed validation: {source}")]
    InvalidInstance {
        /// Instance path.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: InstanceError,
    },
    /// The solver could not produce an initial selection.
    #[error("solver failed: {source}")]
    Solve {
        /// Solver failure.
        #[source]
        source: SolveError,
    },
    /// Re-optimising after a failure event did not succeed.
    #[error("re-optimisation after losing {name:?} failed: {source}")]
    Reoptimize {
        /// Candidate named by the failure event.
        name: String,
        /// Controller failure.
        #[source]
        source: ReoptimizeError,
    },
    /// Serialising the report failed.
    #[error("failed to serialise report: {0}")]
    SerialiseReport(#[source] serde_json::Error),
    /// Writing the report to standard output failed.
    #[error("failed to write report: {0}")]
    WriteReport(#[source] std::io::Error),
    /// Writing the report to the requested file failed.
    #[error("failed to write report to {path:?}: {source}")]
    WriteReportFile {
        /// Output path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
}
