//! Error types emitted by the TourGuide CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use tourguide_core::CatalogError;
use tourguide_rewards::{PoolBuildError, TrackError};

/// Errors emitted by the TourGuide CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// An option was supplied with a value outside its accepted range.
    #[error("invalid {field}: {reason}")]
    InvalidArgument {
        field: &'static str,
        reason: String,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Reading the attraction catalog failed.
    #[error("failed to read attractions from {path:?}: {source}")]
    ReadAttractions {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The attraction catalog could not be decoded or validated.
    #[error("invalid attraction catalog in {path:?}: {source}")]
    ParseAttractions {
        path: Utf8PathBuf,
        #[source]
        source: CatalogError,
    },
    /// Building the reward engine failed.
    #[error("failed to start the reward engine: {0}")]
    BuildEngine(#[from] PoolBuildError),
    /// Locating or ranking attractions for the ad-hoc user failed.
    #[error("nearby query failed: {0}")]
    Nearby(#[from] TrackError),
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Creating the output file failed.
    #[error("failed to create output file {path:?}: {source}")]
    CreateOutput {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
