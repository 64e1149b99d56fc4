//! Core domain types for the TourGuide engine.
//!
//! The crate holds the value types shared by every engine component
//! (attractions, visited locations, rewards and users), the collaborator
//! traits the engine consumes ([`AttractionCatalog`], [`LocationSource`] and
//! [`RewardPointsOracle`]) and the pure geographic rules built on
//! [`distance_miles`].
//!
//! Coordinates are WGS84 `geo::Coord<f64>` values with `x = longitude` and
//! `y = latitude`, both in degrees.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod attraction;
pub mod catalog;
pub mod geo_math;
pub mod location;
pub mod location_source;
pub mod nearby;
pub mod oracle;
pub mod proximity;
pub mod registry;
pub mod user;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use attraction::{Attraction, AttractionError, AttractionId};
#[cfg(feature = "serde")]
pub use catalog::CatalogError;
pub use catalog::{AttractionCatalog, VecCatalog, landmarks};
pub use geo_math::{STATUTE_MILES_PER_NAUTICAL_MILE, distance_miles};
pub use location::VisitedLocation;
pub use location_source::{LocationError, LocationSource};
pub use nearby::{NearbyAttraction, NearbyAttractions};
pub use oracle::{PointsError, RewardPointsOracle};
pub use proximity::{
    ATTRACTION_PROXIMITY_RANGE_MILES, DEFAULT_REWARD_PROXIMITY_MILES, ProximityPolicy,
};
pub use registry::UserRegistry;
pub use user::{User, UserId, UserReward};
