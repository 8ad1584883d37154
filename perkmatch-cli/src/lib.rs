//! Command-line interface for querying a perkmatch benefit catalogue.
//!
//! Every subcommand loads a JSON catalogue, builds the benefit index and
//! prints its answer as pretty JSON on stdout. Diagnostics go to stderr
//! through the tracing subscriber installed by [`run`].
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod catalogue;
mod error;
mod estimate;
mod fs;
mod rank;
mod search;
mod telemetry;

pub use catalogue::CatalogueError;
pub use error::CliError;
pub use telemetry::TelemetryError;

use estimate::{EstimateArgs, run_estimate_with};
use rank::{RankArgs, run_rank_with};
use search::{SearchArgs, run_search_with};

pub(crate) const ARG_CATALOGUE: &str = "catalogue";
pub(crate) const ARG_CARDS: &str = "cards";
pub(crate) const ARG_TAGS: &str = "tags";
pub(crate) const ARG_PLACE: &str = "place";
pub(crate) const ARG_WEIGHTS: &str = "weights";
pub(crate) const ARG_QUERY: &str = "query";
pub(crate) const ARG_LIMIT: &str = "limit";

pub(crate) const ENV_RANK_CATALOGUE: &str = "PERKMATCH_CMDS_RANK_CATALOGUE";
pub(crate) const ENV_RANK_CARDS: &str = "PERKMATCH_CMDS_RANK_CARDS";
pub(crate) const ENV_RANK_TAGS: &str = "PERKMATCH_CMDS_RANK_TAGS";
pub(crate) const ENV_SEARCH_CATALOGUE: &str = "PERKMATCH_CMDS_SEARCH_CATALOGUE";
pub(crate) const ENV_SEARCH_CARDS: &str = "PERKMATCH_CMDS_SEARCH_CARDS";
pub(crate) const ENV_SEARCH_QUERY: &str = "PERKMATCH_CMDS_SEARCH_QUERY";
pub(crate) const ENV_ESTIMATE_CATALOGUE: &str = "PERKMATCH_CMDS_ESTIMATE_CATALOGUE";

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Run the perkmatch CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments, configuration or input files are
/// invalid, or when the answer cannot be written to stdout.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let level = cli.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
    telemetry::init(level)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Rank(args) => run_rank_with(args, writer),
        Command::Search(args) => run_search_with(args, writer),
        Command::Estimate(args) => run_estimate_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "perkmatch",
    about = "Recommend the best card for a place from a benefit catalogue",
    version
)]
struct Cli {
    /// Log filter used when `RUST_LOG` is unset (e.g. "info", "perkmatch_engine=debug").
    #[arg(long, global = true, value_name = "filter")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank the user's cards for a place.
    Rank(RankArgs),
    /// Search the user's benefits for a brand or category.
    Search(SearchArgs),
    /// Report the estimated value of catalogue benefits.
    Estimate(EstimateArgs),
}

/// Split a comma-separated list, trimming entries and dropping blanks.
pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
