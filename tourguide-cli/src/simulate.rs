//! `rewards` and `track` command implementation.

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use camino::Utf8PathBuf;
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tourguide_core::User;
use tourguide_rewards::{BatchReport, EngineConfig, TourGuide};

use crate::sim::{HashedPointsOracle, RandomLocationSource, synthetic_users};
use crate::{
    ARG_ATTRACTIONS, ARG_BATCH_TIMEOUT_SECS, ARG_MAX_WORKERS, ARG_OUTPUT, ARG_PROXIMITY_MILES,
    ARG_SEED, ARG_USERS, CliError, load_catalog, require_existing, write_output,
};

/// Users simulated when `--users` is not given.
const DEFAULT_USERS: usize = 100;

/// Seed used when `--seed` is not given.
const DEFAULT_SEED: u64 = 42;

/// CLI arguments shared by the `rewards` and `track` subcommands.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Simulate a population of users with random visit histories \
                 and run one batch over them. Options can come from CLI \
                 flags, configuration files, or environment variables.",
    about = "Run a batch over synthetic users"
)]
#[ortho_config(prefix = "TOURGUIDE")]
pub(crate) struct SimulationArgs {
    /// Number of synthetic users.
    #[arg(long = ARG_USERS, value_name = "count")]
    #[serde(default)]
    pub(crate) users: Option<usize>,
    /// Seed for user histories and random locations.
    #[arg(long = ARG_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// JSON file holding the attraction catalog (defaults to the landmarks).
    #[arg(long = ARG_ATTRACTIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) attractions: Option<Utf8PathBuf>,
    /// Reward-eligibility radius in miles.
    #[arg(long = ARG_PROXIMITY_MILES, value_name = "miles")]
    #[serde(default)]
    pub(crate) proximity_miles: Option<f64>,
    /// Overall batch deadline in seconds.
    #[arg(long = ARG_BATCH_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) batch_timeout_secs: Option<u64>,
    /// Maximum number of concurrently running batch tasks.
    #[arg(long = ARG_MAX_WORKERS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_workers: Option<usize>,
    /// Write the JSON summary to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl SimulationArgs {
    fn into_config(self) -> Result<SimulationConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SimulationConfig::try_from(merged)
    }
}

/// Resolved simulation configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SimulationConfig {
    pub(crate) users: usize,
    pub(crate) seed: u64,
    pub(crate) attractions: Option<Utf8PathBuf>,
    pub(crate) output: Option<Utf8PathBuf>,
    pub(crate) engine: EngineConfig,
}

impl SimulationConfig {
    fn validate_sources(&self) -> Result<(), CliError> {
        match &self.attractions {
            Some(path) => require_existing(path, ARG_ATTRACTIONS),
            None => Ok(()),
        }
    }
}

impl TryFrom<SimulationArgs> for SimulationConfig {
    type Error = CliError;

    fn try_from(args: SimulationArgs) -> Result<Self, Self::Error> {
        let mut engine = EngineConfig::default();
        if let Some(miles) = args.proximity_miles {
            if !miles.is_finite() || miles < 0.0 {
                return Err(CliError::InvalidArgument {
                    field: ARG_PROXIMITY_MILES,
                    reason: format!("{miles} is not a non-negative distance"),
                });
            }
            engine = engine.with_reward_proximity_miles(miles);
        }
        if let Some(seconds) = args.batch_timeout_secs {
            if seconds == 0 {
                return Err(CliError::InvalidArgument {
                    field: ARG_BATCH_TIMEOUT_SECS,
                    reason: "must be at least one second".to_owned(),
                });
            }
            engine = engine.with_batch_timeout(Duration::from_secs(seconds));
        }
        if let Some(workers) = args.max_workers {
            if workers == 0 {
                return Err(CliError::InvalidArgument {
                    field: ARG_MAX_WORKERS,
                    reason: "must be at least 1".to_owned(),
                });
            }
            engine = engine.with_max_batch_workers(workers);
        }
        Ok(Self {
            users: args.users.unwrap_or(DEFAULT_USERS),
            seed: args.seed.unwrap_or(DEFAULT_SEED),
            attractions: args.attractions,
            output: args.output,
            engine,
        })
    }
}

/// Which batch a simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SimulationMode {
    Rewards,
    Track,
}

impl SimulationMode {
    const fn name(self) -> &'static str {
        match self {
            Self::Rewards => "rewards",
            Self::Track => "track",
        }
    }
}

/// Outcome counts of one batch, as printed by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct BatchSummary {
    pub(crate) submitted: usize,
    pub(crate) completed: usize,
    pub(crate) failed: usize,
    pub(crate) cancelled: usize,
    pub(crate) panicked: usize,
    pub(crate) abandoned: usize,
}

impl From<BatchReport> for BatchSummary {
    fn from(report: BatchReport) -> Self {
        Self {
            submitted: report.submitted,
            completed: report.completed,
            failed: report.failed,
            cancelled: report.cancelled,
            panicked: report.panicked,
            abandoned: report.abandoned,
        }
    }
}

/// JSON summary written by the `rewards` and `track` commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SimulationSummary {
    pub(crate) command: String,
    pub(crate) users: usize,
    pub(crate) attractions: usize,
    pub(crate) elapsed_ms: u64,
    pub(crate) batch: BatchSummary,
    pub(crate) rewarded_users: usize,
    pub(crate) total_rewards: usize,
    pub(crate) total_points: u64,
}

impl SimulationSummary {
    fn new(
        mode: SimulationMode,
        users: &[Arc<User>],
        attractions: usize,
        elapsed: Duration,
        report: BatchReport,
    ) -> Self {
        let rewards: Vec<usize> = users.iter().map(|user| user.rewards().len()).collect();
        Self {
            command: mode.name().to_owned(),
            users: users.len(),
            attractions,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            batch: report.into(),
            rewarded_users: rewards.iter().filter(|count| **count > 0).count(),
            total_rewards: rewards.iter().sum(),
            total_points: users.iter().map(|user| user.total_reward_points()).sum(),
        }
    }
}

pub(crate) fn run_simulation_with(
    mode: SimulationMode,
    args: SimulationArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let summary = execute_simulation(mode, &config)?;
    write_output(writer, config.output.as_deref(), &summary)
}

fn execute_simulation(
    mode: SimulationMode,
    config: &SimulationConfig,
) -> Result<SimulationSummary, CliError> {
    let catalog = load_catalog(config.attractions.as_deref())?;
    let attractions = catalog.len();
    let guide = TourGuide::new(
        catalog,
        HashedPointsOracle,
        RandomLocationSource::new(config.seed.wrapping_add(1)),
        config.engine.clone(),
    )?;
    let users = synthetic_users(config.users, config.seed);

    let started = Instant::now();
    let report = match mode {
        SimulationMode::Rewards => guide.calculate_rewards_batch(&users),
        SimulationMode::Track => guide.track_location_batch(&users),
    };
    let elapsed = started.elapsed();
    info!(
        "{} batch over {} users finished in {elapsed:?}: {report}",
        mode.name(),
        users.len()
    );
    Ok(SimulationSummary::new(mode, &users, attractions, elapsed, report))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SimulationConfig, CliError> {
    let merged = SimulationArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SimulationConfig::try_from(merged)
}
