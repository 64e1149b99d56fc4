//! Engine configuration.

use std::time::Duration;

use tourguide_core::{
    ATTRACTION_PROXIMITY_RANGE_MILES, DEFAULT_REWARD_PROXIMITY_MILES, ProximityPolicy,
};

/// Default number of attractions returned by nearby queries.
const DEFAULT_NEARBY_LIMIT: usize = 5;

/// Default overall deadline for a batch run.
const DEFAULT_BATCH_TIMEOUT: Duration = Duration::from_secs(20 * 60);

/// Default cap on concurrently running batch tasks.
const DEFAULT_MAX_BATCH_WORKERS: usize = 128;

/// Default pause between background tracking cycles.
const DEFAULT_TRACKING_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Configuration for [`crate::TourGuide`] and its components.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use tourguide_rewards::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_reward_proximity_miles(25.0)
///     .with_batch_timeout(Duration::from_secs(60));
/// assert_eq!(config.nearby_limit, 5);
/// assert_eq!(config.reward_proximity_miles, 25.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Radius in miles within which a visit earns a reward.
    pub reward_proximity_miles: f64,
    /// Radius in miles within which an attraction counts as in range.
    pub attraction_proximity_miles: f64,
    /// Number of attractions returned by nearby queries.
    pub nearby_limit: usize,
    /// Overall deadline for one batch call.
    pub batch_timeout: Duration,
    /// Maximum number of batch tasks running at once.
    pub max_batch_workers: usize,
    /// Pause between background tracking cycles.
    pub tracking_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reward_proximity_miles: DEFAULT_REWARD_PROXIMITY_MILES,
            attraction_proximity_miles: ATTRACTION_PROXIMITY_RANGE_MILES,
            nearby_limit: DEFAULT_NEARBY_LIMIT,
            batch_timeout: DEFAULT_BATCH_TIMEOUT,
            max_batch_workers: DEFAULT_MAX_BATCH_WORKERS,
            tracking_interval: DEFAULT_TRACKING_INTERVAL,
        }
    }
}

impl EngineConfig {
    /// Set the reward-eligibility radius.
    #[must_use]
    pub const fn with_reward_proximity_miles(mut self, miles: f64) -> Self {
        self.reward_proximity_miles = miles;
        self
    }

    /// Set the number of attractions returned by nearby queries.
    #[must_use]
    pub const fn with_nearby_limit(mut self, limit: usize) -> Self {
        self.nearby_limit = limit;
        self
    }

    /// Set the overall batch deadline.
    #[must_use]
    pub const fn with_batch_timeout(mut self, timeout: Duration) -> Self {
        self.batch_timeout = timeout;
        self
    }

    /// Set the cap on concurrently running batch tasks.
    #[must_use]
    pub const fn with_max_batch_workers(mut self, workers: usize) -> Self {
        self.max_batch_workers = workers;
        self
    }

    /// Set the pause between background tracking cycles.
    #[must_use]
    pub const fn with_tracking_interval(mut self, interval: Duration) -> Self {
        self.tracking_interval = interval;
        self
    }

    /// Build the proximity policy described by this configuration.
    #[must_use]
    pub fn proximity_policy(&self) -> ProximityPolicy {
        ProximityPolicy::new(self.reward_proximity_miles, self.attraction_proximity_miles)
    }
}
