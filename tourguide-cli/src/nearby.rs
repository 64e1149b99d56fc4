//! `nearby` command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use geo::Coord;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tourguide_core::{NearbyAttractions, User, VisitedLocation};
use tourguide_rewards::{EngineConfig, TourGuide};

use crate::sim::{HashedPointsOracle, RandomLocationSource};
use crate::{
    ARG_ATTRACTIONS, ARG_LATITUDE, ARG_LIMIT, ARG_LONGITUDE, ARG_OUTPUT, CliError,
    ENV_NEARBY_LATITUDE, ENV_NEARBY_LONGITUDE, load_catalog, require_existing, write_output,
};

/// CLI arguments for the `nearby` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank the attractions nearest to a coordinate for an ad-hoc \
                 user, including the reward points each would earn.",
    about = "Rank the attractions nearest to a coordinate"
)]
#[ortho_config(prefix = "TOURGUIDE")]
pub(crate) struct NearbyArgs {
    /// Latitude of the query position in degrees.
    #[arg(long = ARG_LATITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) latitude: Option<f64>,
    /// Longitude of the query position in degrees.
    #[arg(long = ARG_LONGITUDE, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) longitude: Option<f64>,
    /// JSON file holding the attraction catalog (defaults to the landmarks).
    #[arg(long = ARG_ATTRACTIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) attractions: Option<Utf8PathBuf>,
    /// Number of attractions to list.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Write the JSON result to this file instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl NearbyArgs {
    fn into_config(self) -> Result<NearbyConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        NearbyConfig::try_from(merged)
    }
}

/// Resolved `nearby` configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NearbyConfig {
    pub(crate) position: Coord<f64>,
    pub(crate) attractions: Option<Utf8PathBuf>,
    pub(crate) output: Option<Utf8PathBuf>,
    pub(crate) engine: EngineConfig,
}

impl TryFrom<NearbyArgs> for NearbyConfig {
    type Error = CliError;

    fn try_from(args: NearbyArgs) -> Result<Self, Self::Error> {
        let latitude = args.latitude.ok_or(CliError::MissingArgument {
            field: ARG_LATITUDE,
            env: ENV_NEARBY_LATITUDE,
        })?;
        let longitude = args.longitude.ok_or(CliError::MissingArgument {
            field: ARG_LONGITUDE,
            env: ENV_NEARBY_LONGITUDE,
        })?;
        check_degrees(ARG_LATITUDE, latitude, 90.0)?;
        check_degrees(ARG_LONGITUDE, longitude, 180.0)?;

        let mut engine = EngineConfig::default().with_max_batch_workers(1);
        if let Some(limit) = args.limit {
            if limit == 0 {
                return Err(CliError::InvalidArgument {
                    field: ARG_LIMIT,
                    reason: "must be at least 1".to_owned(),
                });
            }
            engine = engine.with_nearby_limit(limit);
        }
        Ok(Self {
            position: Coord {
                x: longitude,
                y: latitude,
            },
            attractions: args.attractions,
            output: args.output,
            engine,
        })
    }
}

fn check_degrees(field: &'static str, value: f64, bound: f64) -> Result<(), CliError> {
    if value.is_finite() && (-bound..=bound).contains(&value) {
        Ok(())
    } else {
        Err(CliError::InvalidArgument {
            field,
            reason: format!("{value} is outside -{bound}..={bound}"),
        })
    }
}

pub(crate) fn run_nearby_with(args: NearbyArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    if let Some(path) = &config.attractions {
        require_existing(path, ARG_ATTRACTIONS)?;
    }
    let nearby = execute_nearby(&config)?;
    write_output(writer, config.output.as_deref(), &nearby)
}

fn execute_nearby(config: &NearbyConfig) -> Result<NearbyAttractions, CliError> {
    let catalog = load_catalog(config.attractions.as_deref())?;
    let guide = TourGuide::new(
        catalog,
        HashedPointsOracle,
        RandomLocationSource::new(0),
        config.engine.clone(),
    )?;
    let visitor = User::with_random_id("visitor", "000", "visitor@tourGuide.com");
    visitor.record_location(VisitedLocation::now(visitor.id(), config.position));
    Ok(guide.nearby_attractions(&visitor)?)
}

#[cfg(test)]
pub(crate) fn nearby_config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<NearbyConfig, CliError> {
    let merged = NearbyArgs::merge_from_layers(layers).map_err(CliError::from)?;
    NearbyConfig::try_from(merged)
}
