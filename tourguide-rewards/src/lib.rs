//! Concurrent reward calculation and proximity ranking for TourGuide.
//!
//! The crate builds the engine on top of the collaborator traits from
//! [`tourguide_core`]:
//!
//! - [`RewardEngine`] grants rewards for one user, or for a batch of users on
//!   the shared [`BatchExecutor`].
//! - [`NearestAttractionRanker`] keeps the `k` nearest attractions while
//!   scanning the catalog once, fetching reward points only for the winners.
//! - [`LocationTracker`] records fresh locations and triggers reward
//!   calculation, again with a batch variant on the same executor.
//! - [`BackgroundTracker`] re-tracks every registered user on an interval
//!   until its [`TrackingHandle`] is stopped or dropped.
//! - [`TourGuide`] wires everything from an [`EngineConfig`].
//!
//! Batch calls never fail: per-user errors, panics and timeouts are logged
//! through the `log` facade and summarised in the returned [`BatchReport`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod engine;
mod error;
mod pool;
mod ranker;
mod service;
mod tracker;

pub use config::EngineConfig;
pub use engine::RewardEngine;
pub use error::{PoolBuildError, RewardError, TrackError, TrackingError};
pub use pool::{BatchExecutor, BatchReport};
pub use ranker::{NearestAttractionRanker, RankedAttraction, rank_nearest};
pub use service::TourGuide;
pub use tracker::{BackgroundTracker, LocationTracker, TrackingHandle};
