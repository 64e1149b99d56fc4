use thiserror::Error;

use crate::UserId;

/// Errors from [`crate::location_source::LocationSource::current_location`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The location service could not report a position for the user.
    #[error("location unavailable for user {user_id}: {message}")]
    Unavailable {
        /// User whose position was requested.
        user_id: UserId,
        /// Description supplied by the location service.
        message: String,
    },
}
