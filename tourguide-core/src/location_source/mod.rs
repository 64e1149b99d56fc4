//! Fetch the current position of a user.
//!
//! The `LocationSource` trait abstracts the GPS service that reports where a
//! user is right now. Each call is independent and may block; failures are
//! reported as [`LocationError`] and propagate to the caller of the tracking
//! operation.

mod error;
mod provider;

pub use error::LocationError;
pub use provider::LocationSource;
