//! Location source trait.

use crate::{UserId, VisitedLocation};

use super::error::LocationError;

/// Report where a user currently is.
///
/// Implementations are shared across batch workers and must be `Send` and
/// `Sync`. The returned [`VisitedLocation`] must carry the requested user id.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use tourguide_core::{LocationError, LocationSource, UserId, VisitedLocation};
/// use uuid::Uuid;
///
/// struct AlwaysAtTheFlatiron;
///
/// impl LocationSource for AlwaysAtTheFlatiron {
///     fn current_location(&self, user_id: UserId) -> Result<VisitedLocation, LocationError> {
///         Ok(VisitedLocation::now(user_id, Coord { x: -73.989723, y: 40.741112 }))
///     }
/// }
///
/// let user_id = Uuid::new_v4();
/// let visit = AlwaysAtTheFlatiron.current_location(user_id)?;
/// assert_eq!(visit.user_id, user_id);
/// # Ok::<(), LocationError>(())
/// ```
pub trait LocationSource: Send + Sync {
    /// Return the current location of `user_id`.
    ///
    /// # Errors
    /// Returns [`LocationError::Unavailable`] when the position cannot be
    /// determined.
    fn current_location(&self, user_id: UserId) -> Result<VisitedLocation, LocationError>;
}
