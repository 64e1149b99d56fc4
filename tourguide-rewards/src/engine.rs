//! Reward calculation for single users and batches.

use std::sync::Arc;

use log::debug;
use tourguide_core::{
    Attraction, AttractionCatalog, ProximityPolicy, RewardPointsOracle, User, UserReward,
    VisitedLocation,
};

use crate::error::RewardError;
use crate::pool::{BatchExecutor, BatchReport};

/// Grants rewards for visits close enough to catalog attractions.
///
/// A user earns at most one reward per attraction name, whichever visit
/// qualifies first in history order. The engine is cheap to clone; clones
/// share the catalog, oracle, policy and worker pool.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
/// use geo::Coord;
/// use tourguide_core::test_support::FixedPointsOracle;
/// use tourguide_core::{ProximityPolicy, User, VecCatalog, VisitedLocation};
/// use tourguide_rewards::{BatchExecutor, RewardEngine};
///
/// let catalog = Arc::new(VecCatalog::landmarks());
/// let executor = Arc::new(BatchExecutor::new(4, Duration::from_secs(60)).unwrap());
/// let engine = RewardEngine::new(
///     catalog,
///     Arc::new(FixedPointsOracle(7)),
///     Arc::new(ProximityPolicy::default()),
///     executor,
/// );
///
/// let user = User::with_random_id("jon", "000", "jon@tourGuide.com");
/// let disneyland = Coord { x: -117.922008, y: 33.817595 };
/// user.record_location(VisitedLocation::now(user.id(), disneyland));
/// assert_eq!(engine.calculate(&user).unwrap(), 1);
/// assert_eq!(user.total_reward_points(), 7);
/// ```
pub struct RewardEngine<C, O> {
    catalog: Arc<C>,
    oracle: Arc<O>,
    policy: Arc<ProximityPolicy>,
    executor: Arc<BatchExecutor>,
}

impl<C, O> Clone for RewardEngine<C, O> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            oracle: Arc::clone(&self.oracle),
            policy: Arc::clone(&self.policy),
            executor: Arc::clone(&self.executor),
        }
    }
}

impl<C, O> RewardEngine<C, O>
where
    C: AttractionCatalog + 'static,
    O: RewardPointsOracle + 'static,
{
    /// Create an engine over shared collaborators.
    pub const fn new(
        catalog: Arc<C>,
        oracle: Arc<O>,
        policy: Arc<ProximityPolicy>,
        executor: Arc<BatchExecutor>,
    ) -> Self {
        Self {
            catalog,
            oracle,
            policy,
            executor,
        }
    }

    /// Grant every reward the user's history currently qualifies for.
    ///
    /// Works on a snapshot of the history, so visits recorded concurrently
    /// are picked up by the next call. Returns the number of rewards added.
    ///
    /// # Errors
    ///
    /// Returns [`RewardError::Points`] when the oracle fails. Rewards granted
    /// before the failure are kept.
    pub fn calculate(&self, user: &User) -> Result<usize, RewardError> {
        let visits = user.visited_locations();
        let attractions = self.catalog.attractions();
        let mut added = 0;
        for visit in &visits {
            for attraction in &attractions {
                if user.is_rewarded_for(&attraction.name)
                    || !self.policy.is_near_for_reward(visit, attraction)
                {
                    continue;
                }
                let points = self.reward_points(attraction, user)?;
                if user.add_reward(UserReward::new(visit.clone(), attraction.clone(), points)) {
                    added += 1;
                }
            }
        }
        debug!("granted {added} rewards to user {}", user.id());
        Ok(added)
    }

    /// Calculate rewards for every user on the shared worker pool.
    ///
    /// Blocks until all users are processed or the pool deadline passes.
    /// Each user must appear at most once per batch.
    pub fn calculate_batch(&self, users: &[Arc<User>]) -> BatchReport {
        let engine = self.clone();
        self.executor
            .run("calculate_batch", users.to_vec(), move |user: Arc<User>| {
                engine.calculate(&user).map(drop)
            })
    }

    /// Points the oracle awards `user` for `attraction`.
    ///
    /// # Errors
    ///
    /// Propagates the oracle's failure as [`RewardError::Points`].
    pub fn reward_points(&self, attraction: &Attraction, user: &User) -> Result<u32, RewardError> {
        Ok(self.oracle.points(attraction.id, user.id())?)
    }

    /// Whether `visit` is close enough to `attraction` for a reward.
    #[must_use]
    pub fn is_near(&self, visit: &VisitedLocation, attraction: &Attraction) -> bool {
        self.policy.is_near_for_reward(visit, attraction)
    }

    /// The proximity policy shared with the rest of the engine.
    #[must_use]
    pub fn policy(&self) -> &ProximityPolicy {
        &self.policy
    }

    pub(crate) const fn executor(&self) -> &Arc<BatchExecutor> {
        &self.executor
    }
}
