//! Periodic re-tracking of every registered user.

use std::sync::Arc;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, error, info};
use tourguide_core::{AttractionCatalog, LocationSource, RewardPointsOracle, UserRegistry};

use super::LocationTracker;
use crate::error::TrackingError;

/// Starts the background tracking loop.
#[derive(Debug, Clone, Copy)]
pub struct BackgroundTracker;

impl BackgroundTracker {
    /// Track every user in `registry` now and then once per `interval`.
    ///
    /// The loop runs on a dedicated thread until the returned handle is
    /// stopped or dropped. A cycle in progress finishes before the thread
    /// exits.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::Spawn`] when the thread cannot be started.
    pub fn start<C, O, L>(
        tracker: LocationTracker<C, O, L>,
        registry: Arc<UserRegistry>,
        interval: Duration,
    ) -> Result<TrackingHandle, TrackingError>
    where
        C: AttractionCatalog + 'static,
        O: RewardPointsOracle + 'static,
        L: LocationSource + 'static,
    {
        let (stop, stopped) = mpsc::channel::<()>();
        let thread = thread::Builder::new()
            .name("tourguide-tracker".into())
            .spawn(move || {
                loop {
                    let users = registry.all_users();
                    let started = Instant::now();
                    let report = tracker.track_batch(&users);
                    info!(
                        "tracked {} users in {:?}: {report}",
                        users.len(),
                        started.elapsed()
                    );
                    match stopped.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {}
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("background tracking stopped");
            })
            .map_err(TrackingError::Spawn)?;
        Ok(TrackingHandle {
            stop: Some(stop),
            thread: Some(thread),
        })
    }
}

/// Owns the background tracking thread. Dropping it stops tracking.
#[derive(Debug)]
pub struct TrackingHandle {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl TrackingHandle {
    /// Stop tracking and wait for the current cycle to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    /// Whether the tracking thread is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|thread| !thread.is_finished())
    }

    fn shutdown(&mut self) {
        drop(self.stop.take());
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            error!("background tracking thread panicked");
        }
    }
}

impl Drop for TrackingHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
