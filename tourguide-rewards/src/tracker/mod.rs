//! Location tracking that feeds reward calculation.

mod background;

use std::sync::Arc;

use tourguide_core::{AttractionCatalog, LocationSource, RewardPointsOracle, User, VisitedLocation};

use crate::engine::RewardEngine;
use crate::error::TrackError;
use crate::pool::BatchReport;

pub use background::{BackgroundTracker, TrackingHandle};

/// Records user locations from a [`LocationSource`] and grants rewards.
pub struct LocationTracker<C, O, L> {
    source: Arc<L>,
    rewards: RewardEngine<C, O>,
}

impl<C, O, L> Clone for LocationTracker<C, O, L> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            rewards: self.rewards.clone(),
        }
    }
}

impl<C, O, L> LocationTracker<C, O, L>
where
    C: AttractionCatalog + 'static,
    O: RewardPointsOracle + 'static,
    L: LocationSource + 'static,
{
    /// Create a tracker over a location source and reward engine.
    pub const fn new(source: Arc<L>, rewards: RewardEngine<C, O>) -> Self {
        Self { source, rewards }
    }

    /// The user's latest location, fetching one only when history is empty.
    ///
    /// A user with history is answered from it without contacting the
    /// location source or recalculating rewards.
    ///
    /// # Errors
    ///
    /// See [`LocationTracker::refresh`].
    pub fn track(&self, user: &User) -> Result<VisitedLocation, TrackError> {
        user.last_visited_location().map_or_else(|| self.refresh(user), Ok)
    }

    /// Fetch a fresh location, record it and recalculate rewards.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::Location`] when the fetch fails, leaving the
    /// history untouched, and [`TrackError::Reward`] when reward calculation
    /// fails after the location was recorded.
    pub fn refresh(&self, user: &User) -> Result<VisitedLocation, TrackError> {
        let location = self.source.current_location(user.id())?;
        user.record_location(location.clone());
        self.rewards.calculate(user)?;
        Ok(location)
    }

    /// Refresh every user on the shared worker pool.
    ///
    /// Always fetches fresh locations. Blocks until all users are processed
    /// or the pool deadline passes.
    pub fn track_batch(&self, users: &[Arc<User>]) -> BatchReport {
        let tracker = self.clone();
        self.rewards
            .executor()
            .run("track_batch", users.to_vec(), move |user: Arc<User>| {
                tracker.refresh(&user).map(drop)
            })
    }
}
