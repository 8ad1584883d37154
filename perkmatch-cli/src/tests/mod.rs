//! Shared test harness modules for the perkmatch CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod estimate_unit;
mod helpers;
mod rank_unit;
mod search_unit;
mod unit;
