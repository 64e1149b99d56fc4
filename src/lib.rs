//! Facade crate for the TourGuide reward engine.
//!
//! This crate re-exports the core domain types and, behind the default
//! `rewards` feature, the concurrent reward engine, ranker and trackers.

#![forbid(unsafe_code)]

pub use tourguide_core::{
    Attraction, AttractionCatalog, AttractionError, AttractionId, LocationError, LocationSource,
    NearbyAttraction, NearbyAttractions, PointsError, ProximityPolicy, RewardPointsOracle, User,
    UserId, UserRegistry, UserReward, VecCatalog, VisitedLocation, distance_miles,
};

#[cfg(feature = "serde")]
pub use tourguide_core::CatalogError;

#[cfg(feature = "rewards")]
pub use tourguide_rewards::{
    BackgroundTracker, BatchExecutor, BatchReport, EngineConfig, LocationTracker,
    NearestAttractionRanker, PoolBuildError, RewardEngine, RewardError, TourGuide, TrackError,
    TrackingError, TrackingHandle,
};
