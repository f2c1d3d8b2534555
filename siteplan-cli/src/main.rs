//! Entry point for the `siteplan` binary.
#![forbid(unsafe_code)]

use env_logger::{Builder, Env, Target};
use siteplan_cli::CliError;

fn main() -> eyre::Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .init();
    siteplan_cli::run().or_else(|err| match err {
        CliError::ArgumentParsing(parse) => parse.exit(),
        other => Err(other.into()),
    })
}
