//! Deterministic collaborators for unit and behavioural tests.
//!
//! Available to this crate's tests and, behind the `test-support` feature, to
//! downstream crates.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use geo::Coord;

use crate::{
    Attraction, AttractionId, LocationError, LocationSource, PointsError, RewardPointsOracle,
    User, UserId, VisitedLocation,
};

/// Construct an attraction at `(latitude, longitude)`.
pub fn attraction(id: AttractionId, name: &str, latitude: f64, longitude: f64) -> Attraction {
    Attraction::new(id, name, Coord { x: longitude, y: latitude })
}

/// Construct a user with a random id and placeholder contact details.
pub fn user(name: &str) -> User {
    User::with_random_id(name, "000", format!("{name}@tourGuide.com"))
}

/// Oracle granting the same score for every lookup.
#[derive(Debug, Copy, Clone)]
pub struct FixedPointsOracle(pub u32);

impl RewardPointsOracle for FixedPointsOracle {
    fn points(&self, _attraction_id: AttractionId, _user_id: UserId) -> Result<u32, PointsError> {
        Ok(self.0)
    }
}

/// Oracle scoring by attraction id and counting lookups.
///
/// The score for attraction `n` is `n * 10`, which lets tests tell entries
/// apart.
#[derive(Debug, Default)]
pub struct CountingOracle {
    calls: AtomicUsize,
}

impl CountingOracle {
    /// Number of lookups made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RewardPointsOracle for CountingOracle {
    fn points(&self, attraction_id: AttractionId, _user_id: UserId) -> Result<u32, PointsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(u32::try_from(attraction_id.saturating_mul(10)).unwrap_or(u32::MAX))
    }
}

/// Oracle that sleeps before answering, for timeout tests.
#[derive(Debug, Copy, Clone)]
pub struct DelayedPointsOracle {
    /// Score returned after the delay.
    pub points: u32,
    /// Time spent in each lookup.
    pub delay: Duration,
}

impl RewardPointsOracle for DelayedPointsOracle {
    fn points(&self, _attraction_id: AttractionId, _user_id: UserId) -> Result<u32, PointsError> {
        std::thread::sleep(self.delay);
        Ok(self.points)
    }
}

/// Oracle that fails every lookup.
#[derive(Debug, Copy, Clone, Default)]
pub struct FailingOracle;

impl RewardPointsOracle for FailingOracle {
    fn points(&self, attraction_id: AttractionId, user_id: UserId) -> Result<u32, PointsError> {
        Err(PointsError::Unavailable {
            attraction_id,
            user_id,
            message: "reward service offline".into(),
        })
    }
}

/// Location source that always reports the same coordinate.
#[derive(Debug)]
pub struct FixedLocationSource {
    location: Coord<f64>,
    fetches: AtomicUsize,
}

impl FixedLocationSource {
    /// Report `location` for every user.
    pub const fn new(location: Coord<f64>) -> Self {
        Self {
            location,
            fetches: AtomicUsize::new(0),
        }
    }

    /// Number of fetches made so far.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl LocationSource for FixedLocationSource {
    fn current_location(&self, user_id: UserId) -> Result<VisitedLocation, LocationError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(VisitedLocation::now(user_id, self.location))
    }
}

/// Location source that fails every fetch.
#[derive(Debug, Copy, Clone, Default)]
pub struct FailingLocationSource;

impl LocationSource for FailingLocationSource {
    fn current_location(&self, user_id: UserId) -> Result<VisitedLocation, LocationError> {
        Err(LocationError::Unavailable {
            user_id,
            message: "gps offline".into(),
        })
    }
}
