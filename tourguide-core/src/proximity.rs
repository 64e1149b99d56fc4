//! Distance thresholds deciding reward eligibility and nearby listings.

use std::sync::atomic::{AtomicU64, Ordering};

use geo::Coord;

use crate::{Attraction, VisitedLocation, distance_miles};

/// Default radius, in miles, within which a visit earns a reward.
pub const DEFAULT_REWARD_PROXIMITY_MILES: f64 = 10.0;

/// Radius, in miles, within which an attraction counts as in range.
pub const ATTRACTION_PROXIMITY_RANGE_MILES: f64 = 200.0;

/// Reward-eligibility and near-display radii.
///
/// The reward buffer can be changed at runtime and is shared by every batch
/// running against the policy. Updates use relaxed atomics: a batch already in
/// flight may observe the old or the new value on any given comparison, never
/// a torn one.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tourguide_core::{Attraction, ProximityPolicy, VisitedLocation};
/// use uuid::Uuid;
///
/// let policy = ProximityPolicy::default();
/// let zoo = Attraction::new(1, "Bronx Zoo", Coord { x: -73.872971, y: 40.852905 });
/// let visit = VisitedLocation::now(Uuid::new_v4(), Coord { x: -73.9, y: 40.85 });
///
/// assert!(policy.is_near_for_reward(&visit, &zoo));
/// policy.set_reward_proximity_buffer(0.0);
/// assert!(!policy.is_near_for_reward(&visit, &zoo));
/// policy.reset_reward_proximity_buffer();
/// assert_eq!(policy.reward_proximity_buffer(), 10.0);
/// ```
#[derive(Debug)]
pub struct ProximityPolicy {
    reward_buffer_bits: AtomicU64,
    default_reward_buffer: f64,
    attraction_range: f64,
}

impl ProximityPolicy {
    /// Construct a policy with explicit radii in miles.
    ///
    /// `reward_buffer` also becomes the value restored by
    /// [`ProximityPolicy::reset_reward_proximity_buffer`].
    pub fn new(reward_buffer: f64, attraction_range: f64) -> Self {
        Self {
            reward_buffer_bits: AtomicU64::new(reward_buffer.to_bits()),
            default_reward_buffer: reward_buffer,
            attraction_range,
        }
    }

    /// Current reward-eligibility radius in miles.
    pub fn reward_proximity_buffer(&self) -> f64 {
        f64::from_bits(self.reward_buffer_bits.load(Ordering::Relaxed))
    }

    /// Replace the reward-eligibility radius for subsequent checks.
    pub fn set_reward_proximity_buffer(&self, miles: f64) {
        self.reward_buffer_bits
            .store(miles.to_bits(), Ordering::Relaxed);
    }

    /// Restore the radius the policy was constructed with.
    pub fn reset_reward_proximity_buffer(&self) {
        self.set_reward_proximity_buffer(self.default_reward_buffer);
    }

    /// Near-display radius in miles.
    pub const fn attraction_proximity_range(&self) -> f64 {
        self.attraction_range
    }

    /// Distance in miles between a visit and an attraction.
    pub fn distance_to(&self, visited_location: &VisitedLocation, attraction: &Attraction) -> f64 {
        distance_miles(attraction.location, visited_location.location)
    }

    /// Whether the visit is close enough to the attraction to earn a reward.
    pub fn is_near_for_reward(
        &self,
        visited_location: &VisitedLocation,
        attraction: &Attraction,
    ) -> bool {
        self.distance_to(visited_location, attraction) <= self.reward_proximity_buffer()
    }

    /// Whether the attraction lies within the near-display radius of `location`.
    pub fn is_within_attraction_proximity(
        &self,
        attraction: &Attraction,
        location: Coord<f64>,
    ) -> bool {
        distance_miles(attraction.location, location) <= self.attraction_range
    }
}

impl Default for ProximityPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_REWARD_PROXIMITY_MILES,
            ATTRACTION_PROXIMITY_RANGE_MILES,
        )
    }
}
