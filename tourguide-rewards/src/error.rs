//! Error types raised by the reward engine and trackers.

use thiserror::Error;
use tourguide_core::{LocationError, PointsError};

/// Errors from single-user reward operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RewardError {
    /// The reward points oracle failed.
    #[error(transparent)]
    Points(#[from] PointsError),
}

/// Errors from single-user tracking operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    /// The location source failed; nothing was recorded.
    #[error(transparent)]
    Location(#[from] LocationError),
    /// The location was recorded but reward calculation failed.
    #[error("location recorded but reward calculation failed: {0}")]
    Reward(#[from] RewardError),
    /// Reward points for the nearest attractions could not be fetched.
    #[error("failed to rank nearby attractions: {0}")]
    Ranking(#[source] RewardError),
}

/// Errors raised while building a [`crate::BatchExecutor`].
#[derive(Debug, Error)]
pub enum PoolBuildError {
    /// A pool needs room for at least one task.
    #[error("batch worker cap must be at least 1")]
    NoWorkers,
    /// The Tokio runtime backing the pool could not start.
    #[error("failed to build batch runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Errors raised while starting background tracking.
#[derive(Debug, Error)]
pub enum TrackingError {
    /// The tracking thread could not be spawned.
    #[error("failed to spawn tracking thread: {0}")]
    Spawn(#[source] std::io::Error),
}
