//! Timestamped positions recorded for a user.

use chrono::{DateTime, Utc};
use geo::Coord;

use crate::UserId;

/// A position a user was observed at.
///
/// Visited locations are immutable once created and are appended to the
/// owning user's history in chronological order.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tourguide_core::VisitedLocation;
/// use uuid::Uuid;
///
/// let user_id = Uuid::new_v4();
/// let visit = VisitedLocation::now(user_id, Coord { x: -73.98, y: 40.74 });
/// assert_eq!(visit.user_id, user_id);
/// assert_eq!(visit.latitude(), 40.74);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitedLocation {
    /// User the observation belongs to.
    pub user_id: UserId,
    /// Observed position.
    pub location: Coord<f64>,
    /// When the observation was made.
    pub time_visited: DateTime<Utc>,
}

impl VisitedLocation {
    /// Construct a visited location with an explicit timestamp.
    pub const fn new(user_id: UserId, location: Coord<f64>, time_visited: DateTime<Utc>) -> Self {
        Self {
            user_id,
            location,
            time_visited,
        }
    }

    /// Construct a visited location stamped with the current time.
    pub fn now(user_id: UserId, location: Coord<f64>) -> Self {
        Self::new(user_id, location, Utc::now())
    }

    /// Latitude in degrees.
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }
}
