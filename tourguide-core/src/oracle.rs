//! Reward point lookups for an attraction and a user.

use thiserror::Error;

use crate::{AttractionId, UserId};

/// Errors from [`RewardPointsOracle::points`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointsError {
    /// The backing reward service could not produce a score.
    #[error("reward points unavailable for attraction {attraction_id} and user {user_id}: {message}")]
    Unavailable {
        /// Attraction the lookup was for.
        attraction_id: AttractionId,
        /// User the lookup was for.
        user_id: UserId,
        /// Description supplied by the backing service.
        message: String,
    },
}

/// Score how many reward points a user earns at an attraction.
///
/// Lookups may be slow or rate limited, so callers should only ask for
/// attractions they are about to reward or display. Implementations must be
/// thread-safe (`Send` + `Sync`) because batch runs call them from many
/// workers at once.
///
/// # Examples
///
/// ```rust
/// use tourguide_core::{AttractionId, PointsError, RewardPointsOracle, UserId};
/// use uuid::Uuid;
///
/// struct FlatRate;
///
/// impl RewardPointsOracle for FlatRate {
///     fn points(&self, _attraction: AttractionId, _user: UserId) -> Result<u32, PointsError> {
///         Ok(100)
///     }
/// }
///
/// assert_eq!(FlatRate.points(1, Uuid::new_v4()), Ok(100));
/// ```
pub trait RewardPointsOracle: Send + Sync {
    /// Return the points `user_id` earns at `attraction_id`.
    ///
    /// # Errors
    /// Returns [`PointsError::Unavailable`] when the score cannot be fetched.
    fn points(&self, attraction_id: AttractionId, user_id: UserId) -> Result<u32, PointsError>;
}
