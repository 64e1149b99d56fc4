//! Command-line interface for TourGuide simulation runs.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tourguide_core::VecCatalog;

mod error;
mod nearby;
mod sim;
mod simulate;

pub use error::CliError;

use nearby::{NearbyArgs, run_nearby_with};
use simulate::{SimulationArgs, SimulationMode, run_simulation_with};

pub(crate) const ARG_USERS: &str = "users";
pub(crate) const ARG_SEED: &str = "seed";
pub(crate) const ARG_ATTRACTIONS: &str = "attractions";
pub(crate) const ARG_PROXIMITY_MILES: &str = "proximity-miles";
pub(crate) const ARG_BATCH_TIMEOUT_SECS: &str = "batch-timeout-secs";
pub(crate) const ARG_MAX_WORKERS: &str = "max-workers";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_LATITUDE: &str = "latitude";
pub(crate) const ARG_LONGITUDE: &str = "longitude";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ENV_NEARBY_LATITUDE: &str = "TOURGUIDE_CMDS_NEARBY_LATITUDE";
pub(crate) const ENV_NEARBY_LONGITUDE: &str = "TOURGUIDE_CMDS_NEARBY_LONGITUDE";

/// Run the TourGuide CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    dispatch(cli.command, &mut stdout)
}

fn dispatch(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Rewards(args) => run_simulation_with(SimulationMode::Rewards, args, writer),
        Command::Track(args) => run_simulation_with(SimulationMode::Track, args, writer),
        Command::Nearby(args) => run_nearby_with(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tourguide",
    about = "Simulate reward calculation and proximity ranking for TourGuide",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate rewards for a population of synthetic users.
    Rewards(SimulationArgs),
    /// Track a population of synthetic users at random locations.
    Track(SimulationArgs),
    /// Rank the attractions nearest to a coordinate.
    Nearby(NearbyArgs),
}

/// Check that `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match tourguide_fs::is_regular_file(path) {
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

/// Load the attraction catalog from JSON, or the built-in landmarks.
pub(crate) fn load_catalog(path: Option<&Utf8Path>) -> Result<VecCatalog, CliError> {
    let Some(path) = path else {
        return Ok(VecCatalog::landmarks());
    };
    let contents =
        tourguide_fs::read_utf8_to_string(path).map_err(|source| CliError::ReadAttractions {
            path: path.to_path_buf(),
            source,
        })?;
    VecCatalog::from_json_reader(contents.as_bytes()).map_err(|source| {
        CliError::ParseAttractions {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Write `value` as pretty JSON to `output`, or to `writer` when unset.
pub(crate) fn write_output<T: Serialize>(
    writer: &mut dyn Write,
    output: Option<&Utf8Path>,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    match output {
        Some(path) => {
            let mut file =
                tourguide_fs::create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                    path: path.to_path_buf(),
                    source,
                })?;
            write_payload(&mut file, &payload)
        }
        None => write_payload(writer, &payload),
    }
}

fn write_payload(writer: &mut dyn Write, payload: &str) -> Result<(), CliError> {
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
