//! Users, their location history and the rewards they have earned.
//!
//! A [`User`] is shared between the tracker, the reward engine and the user
//! registry as `Arc<User>`. The location history and the reward list each sit
//! behind their own lock; readers take a snapshot copy and never iterate while
//! holding a lock.

use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::{Attraction, VisitedLocation};

/// Identifier of a user.
pub type UserId = Uuid;

/// Points awarded to a user for visiting near an attraction.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserReward {
    /// The visit that qualified for the reward.
    pub visited_location: VisitedLocation,
    /// The rewarded attraction.
    pub attraction: Attraction,
    /// Points granted by the reward points oracle.
    pub points: u32,
}

impl UserReward {
    /// Construct a reward.
    pub const fn new(
        visited_location: VisitedLocation,
        attraction: Attraction,
        points: u32,
    ) -> Self {
        Self {
            visited_location,
            attraction,
            points,
        }
    }

    /// Name of the rewarded attraction, the deduplication key.
    pub fn attraction_name(&self) -> &str {
        &self.attraction.name
    }
}

/// A tracked visitor.
///
/// The visited-location history is append-only and kept in insertion order.
/// The reward list holds at most one entry per attraction name; the check and
/// the insert in [`User::add_reward`] happen under the same lock.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tourguide_core::{User, VisitedLocation};
///
/// let user = User::with_random_id("jon", "000", "jon@tourguide.com");
/// assert!(user.last_visited_location().is_none());
///
/// user.record_location(VisitedLocation::now(user.id(), Coord { x: 1.0, y: 2.0 }));
/// assert_eq!(user.visited_locations().len(), 1);
/// ```
#[derive(Debug)]
pub struct User {
    id: UserId,
    name: String,
    phone: String,
    email: String,
    visited_locations: RwLock<Vec<VisitedLocation>>,
    rewards: Mutex<Vec<UserReward>>,
}

impl User {
    /// Construct a user with an empty history.
    pub fn new(
        id: UserId,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            visited_locations: RwLock::new(Vec::new()),
            rewards: Mutex::new(Vec::new()),
        }
    }

    /// Construct a user with a freshly generated identifier.
    pub fn with_random_id(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self::new(Uuid::new_v4(), name, phone, email)
    }

    /// Unique identifier.
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// User name, the registry key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact phone number.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Contact email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Append a location to the history.
    pub fn record_location(&self, visited_location: VisitedLocation) {
        self.visited_locations.write().push(visited_location);
    }

    /// Copy of the history, oldest first.
    pub fn visited_locations(&self) -> Vec<VisitedLocation> {
        self.visited_locations.read().clone()
    }

    /// Most recently recorded location, if any.
    pub fn last_visited_location(&self) -> Option<VisitedLocation> {
        self.visited_locations.read().last().cloned()
    }

    /// Copy of the rewards earned so far, in the order they were granted.
    pub fn rewards(&self) -> Vec<UserReward> {
        self.rewards.lock().clone()
    }

    /// Whether a reward for the named attraction was already granted.
    pub fn is_rewarded_for(&self, attraction_name: &str) -> bool {
        self.rewards
            .lock()
            .iter()
            .any(|reward| reward.attraction_name() == attraction_name)
    }

    /// Record a reward unless the attraction was already rewarded.
    ///
    /// Returns `true` when the reward was added.
    pub fn add_reward(&self, reward: UserReward) -> bool {
        let mut rewards = self.rewards.lock();
        if rewards
            .iter()
            .any(|existing| existing.attraction_name() == reward.attraction_name())
        {
            return false;
        }
        rewards.push(reward);
        true
    }

    /// Sum of all reward points earned.
    pub fn total_reward_points(&self) -> u64 {
        self.rewards
            .lock()
            .iter()
            .map(|reward| u64::from(reward.points))
            .sum()
    }
}
