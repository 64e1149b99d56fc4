//! The TourGuide service facade.

use std::sync::Arc;

use tourguide_core::{
    Attraction, AttractionCatalog, LocationSource, NearbyAttraction, NearbyAttractions,
    ProximityPolicy, RewardPointsOracle, User, UserRegistry, UserReward, VisitedLocation,
};

use crate::config::EngineConfig;
use crate::engine::RewardEngine;
use crate::error::{PoolBuildError, RewardError, TrackError, TrackingError};
use crate::pool::{BatchExecutor, BatchReport};
use crate::ranker::NearestAttractionRanker;
use crate::tracker::{BackgroundTracker, LocationTracker, TrackingHandle};

/// Entry point wiring the registry, engine, ranker and tracker together.
///
/// All components share one proximity policy and one worker pool.
pub struct TourGuide<C, O, L> {
    config: EngineConfig,
    registry: Arc<UserRegistry>,
    policy: Arc<ProximityPolicy>,
    rewards: RewardEngine<C, O>,
    ranker: NearestAttractionRanker<C, O>,
    tracker: LocationTracker<C, O, L>,
}

impl<C, O, L> TourGuide<C, O, L>
where
    C: AttractionCatalog + 'static,
    O: RewardPointsOracle + 'static,
    L: LocationSource + 'static,
{
    /// Build the service from its collaborators and configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PoolBuildError`] when the worker pool cannot be created.
    pub fn new(
        catalog: C,
        oracle: O,
        source: L,
        config: EngineConfig,
    ) -> Result<Self, PoolBuildError> {
        let executor = Arc::new(BatchExecutor::new(
            config.max_batch_workers,
            config.batch_timeout,
        )?);
        let shared_catalog = Arc::new(catalog);
        let policy = Arc::new(config.proximity_policy());
        let rewards = RewardEngine::new(
            Arc::clone(&shared_catalog),
            Arc::new(oracle),
            Arc::clone(&policy),
            executor,
        );
        let ranker = NearestAttractionRanker::new(shared_catalog, rewards.clone());
        let tracker = LocationTracker::new(Arc::new(source), rewards.clone());
        Ok(Self {
            config,
            registry: Arc::new(UserRegistry::new()),
            policy,
            rewards,
            ranker,
            tracker,
        })
    }

    /// Configuration the service was built with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Registered users.
    #[must_use]
    pub const fn registry(&self) -> &Arc<UserRegistry> {
        &self.registry
    }

    /// Shared proximity policy.
    #[must_use]
    pub fn policy(&self) -> &ProximityPolicy {
        &self.policy
    }

    /// Change the reward-eligibility radius for later checks.
    ///
    /// Batches already running may observe the old or the new value.
    pub fn set_proximity_buffer(&self, miles: f64) {
        self.policy.set_reward_proximity_buffer(miles);
    }

    /// Restore the configured reward-eligibility radius.
    pub fn reset_proximity_buffer(&self) {
        self.policy.reset_reward_proximity_buffer();
    }

    /// Grant the rewards `user` currently qualifies for.
    ///
    /// # Errors
    ///
    /// See [`RewardEngine::calculate`].
    pub fn calculate_rewards(&self, user: &User) -> Result<usize, RewardError> {
        self.rewards.calculate(user)
    }

    /// Grant rewards for every user on the worker pool.
    #[must_use]
    pub fn calculate_rewards_batch(&self, users: &[Arc<User>]) -> BatchReport {
        self.rewards.calculate_batch(users)
    }

    /// Latest location for `user`, fetching one only if history is empty.
    ///
    /// # Errors
    ///
    /// See [`LocationTracker::track`].
    pub fn track_location(&self, user: &User) -> Result<VisitedLocation, TrackError> {
        self.tracker.track(user)
    }

    /// Alias of [`TourGuide::track_location`].
    ///
    /// # Errors
    ///
    /// See [`LocationTracker::track`].
    pub fn user_location(&self, user: &User) -> Result<VisitedLocation, TrackError> {
        self.track_location(user)
    }

    /// Miles between a recorded visit and an attraction.
    #[must_use]
    pub fn distance_from_visited_location(
        &self,
        visited_location: &VisitedLocation,
        attraction: &Attraction,
    ) -> f64 {
        self.policy.distance_to(visited_location, attraction)
    }

    /// Fetch and record a fresh location for `user`.
    ///
    /// # Errors
    ///
    /// See [`LocationTracker::refresh`].
    pub fn refresh_location(&self, user: &User) -> Result<VisitedLocation, TrackError> {
        self.tracker.refresh(user)
    }

    /// Refresh every user on the worker pool.
    #[must_use]
    pub fn track_location_batch(&self, users: &[Arc<User>]) -> BatchReport {
        self.tracker.track_batch(users)
    }

    /// The configured number of attractions nearest to `location`.
    ///
    /// # Errors
    ///
    /// See [`NearestAttractionRanker::k_nearest`].
    pub fn nearest_attractions(
        &self,
        location: &VisitedLocation,
        user: &User,
    ) -> Result<Vec<NearbyAttraction>, RewardError> {
        self.ranker.k_nearest(location, self.config.nearby_limit, user)
    }

    /// Nearest attractions to the user's tracked location.
    ///
    /// # Errors
    ///
    /// Returns [`TrackError::Location`] or [`TrackError::Reward`] when the
    /// user has no history and tracking fails, and [`TrackError::Ranking`]
    /// when reward points for the ranked attractions cannot be fetched.
    pub fn nearby_attractions(&self, user: &User) -> Result<NearbyAttractions, TrackError> {
        let location = self.track_location(user)?;
        let attractions = self
            .nearest_attractions(&location, user)
            .map_err(TrackError::Ranking)?;
        Ok(NearbyAttractions {
            user_location: location.location,
            attractions,
        })
    }

    /// Rewards granted to `user` so far.
    #[must_use]
    pub fn user_rewards(&self, user: &User) -> Vec<UserReward> {
        user.rewards()
    }

    /// Start re-tracking every registered user on the configured interval.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::Spawn`] when the tracking thread cannot start.
    pub fn start_tracking(&self) -> Result<TrackingHandle, TrackingError> {
        BackgroundTracker::start(
            self.tracker.clone(),
            Arc::clone(&self.registry),
            self.config.tracking_interval,
        )
    }
}
