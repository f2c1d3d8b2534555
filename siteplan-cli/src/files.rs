//! Instance loading and report output shared by the subcommands.

use std::io::Write;

use camino::Utf8Path;
use serde::Serialize;
use siteplan_core::{InstanceRecord, ProblemInstance};

use crate::CliError;

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match siteplan_fs::is_regular_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Reads, decodes and validates a JSON instance.
pub(crate) fn load_instance(path: &Utf8Path) -> Result<ProblemInstance, CliError> {
    let text = siteplan_fs::read_to_string(path).map_err(|source| CliError::ReadInstance {
        path: path.to_path_buf(),
        source,
    })?;
    let record: InstanceRecord =
        serde_json::from_str(&text).map_err(|source| CliError::ParseInstance {
            path: path.to_path_buf(),
            source,
        })?;
    let instance =
        ProblemInstance::from_record(record).map_err(|source| CliError::InvalidInstance {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!(
        "loaded {} candidates from {path} (budget {}, {} teammates)",
        instance.candidates().len(),
        instance.limits().budget(),
        instance.limits().max_teammates()
    );
    Ok(instance)
}

/// Writes `report` as pretty JSON to `output`, or to `writer` when no path
/// is given.
pub(crate) fn emit_report<T: Serialize>(
    report: &T,
    output: Option<&Utf8Path>,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut payload = serde_json::to_string_pretty(report).map_err(CliError::SerialiseReport)?;
    payload.push('\n');
    match output {
        Some(path) => siteplan_fs::write_replacing(path, payload.as_bytes()).map_err(|source| {
            CliError::WriteReportFile {
                path: path.to_path_buf(),
                source,
            }
        }),
        None => writer
            .write_all(payload.as_bytes())
            .map_err(CliError::WriteReport),
    }
}
