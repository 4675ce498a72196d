//! Command-line interface for planning trips with the Optiroute engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod format;
mod input;
mod plan;

pub use error::CliError;
pub use format::format_duration;
use plan::{PlanArgs, run_plan};

const ARG_STOPS: &str = "stops";
const ARG_GAZETTEER: &str = "gazetteer";
const ARG_NOMINATIM_URL: &str = "nominatim-url";
const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_TRIP_MODE: &str = "trip-mode";
const ARG_TRAVEL_MODE: &str = "travel-mode";
const ARG_AVOID_HIGHWAYS: &str = "avoid-highways";
const ARG_MAX_POINTS: &str = "max-points";
const ARG_DURATIONS_CSV: &str = "durations-csv";
const ENV_STOPS: &str = "OPTIROUTE_CMDS_PLAN_STOPS";

/// Run the Optiroute CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration, stop
/// resolution, solving or writing the report fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "optiroute",
    about = "Plan the fastest trip through a list of addresses",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Geocode a stop list, solve the trip and print it as JSON.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
