//! Shared test harness modules for the siteplan CLI.
#![expect(clippy::panic, reason = "Tests assert panic branches to surface unexpected CLI outcomes")]
#![expect(clippy::expect_used, reason = "Tests use expect for readable setup failures")]

use super::*;

mod helpers;
mod plan_steps;
