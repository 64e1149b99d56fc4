//! Shared worker pool for batch operations.
//!
//! Each batch submits one blocking task per item and waits for the whole set
//! under a single deadline. Tasks are independent: an error, cancellation or
//! panic in one task is counted and logged without touching its siblings.
//! Tasks still running when the deadline passes are detached, not killed.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, warn};
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tokio::task::JoinSet;

use crate::error::PoolBuildError;

/// Summary of one batch run.
///
/// `submitted` always equals the sum of the other counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Tasks handed to the pool.
    pub submitted: usize,
    /// Tasks that returned `Ok`.
    pub completed: usize,
    /// Tasks that returned an error.
    pub failed: usize,
    /// Tasks cancelled before finishing.
    pub cancelled: usize,
    /// Tasks that panicked.
    pub panicked: usize,
    /// Tasks still outstanding when the deadline passed.
    pub abandoned: usize,
}

impl BatchReport {
    /// Whether every submitted task completed successfully.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.completed == self.submitted
    }

    /// Whether the batch deadline passed with tasks outstanding.
    #[must_use]
    pub const fn timed_out(&self) -> bool {
        self.abandoned > 0
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} submitted, {} completed, {} failed, {} cancelled, {} panicked, {} abandoned",
            self.submitted,
            self.completed,
            self.failed,
            self.cancelled,
            self.panicked,
            self.abandoned,
        )
    }
}

/// Capped pool running blocking per-item tasks under a batch deadline.
///
/// The pool owns a dedicated Tokio runtime. Its blocking thread pool grows on
/// demand up to `max_workers` threads; further tasks queue until a thread
/// frees up.
///
/// # Runtime behaviour
///
/// [`BatchExecutor::run`] blocks the calling thread. Called from inside a
/// multi-threaded Tokio runtime it uses [`tokio::task::block_in_place`];
/// called from inside a `current_thread` runtime it waits on a scoped helper
/// thread so the caller's runtime is never re-entered.
pub struct BatchExecutor {
    handle: Handle,
    timeout: Duration,
    runtime: Option<Runtime>,
}

impl fmt::Debug for BatchExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchExecutor")
            .field("timeout", &self.timeout)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl BatchExecutor {
    /// Build a pool with at most `max_workers` concurrent tasks.
    ///
    /// # Errors
    ///
    /// Returns [`PoolBuildError::NoWorkers`] when `max_workers` is zero and
    /// [`PoolBuildError::Runtime`] when the runtime fails to start.
    pub fn new(max_workers: usize, timeout: Duration) -> Result<Self, PoolBuildError> {
        if max_workers == 0 {
            return Err(PoolBuildError::NoWorkers);
        }
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(max_workers)
            .thread_name("tourguide-batch")
            .enable_all()
            .build()
            .map_err(PoolBuildError::Runtime)?;
        Ok(Self {
            handle: runtime.handle().clone(),
            timeout,
            runtime: Some(runtime),
        })
    }

    /// Overall deadline applied to each batch.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `task` once per item and wait for all of them or the deadline.
    ///
    /// Never fails: outcomes are logged under `label` and tallied in the
    /// returned report.
    pub fn run<T, E, F>(&self, label: &'static str, items: Vec<T>, task: F) -> BatchReport
    where
        T: Send + 'static,
        E: fmt::Display + Send + 'static,
        F: Fn(T) -> Result<(), E> + Send + Sync + 'static,
    {
        let shared_task = Arc::new(task);
        let mut tasks = JoinSet::new();
        let mut report = BatchReport {
            submitted: items.len(),
            ..BatchReport::default()
        };
        for item in items {
            let per_item = Arc::clone(&shared_task);
            tasks.spawn_blocking_on(move || per_item(item), &self.handle);
        }
        debug!("{label}: submitted {} tasks", report.submitted);

        let deadline = self.timeout;
        let finished = self.block_on(async {
            tokio::time::timeout(deadline, drain(label, &mut tasks, &mut report))
                .await
                .is_ok()
        });
        if !finished {
            report.abandoned = tasks.len();
            tasks.detach_all();
            warn!(
                "{label}: deadline of {deadline:?} passed with {} tasks outstanding",
                report.abandoned
            );
        }
        debug!("{label}: {report}");
        report
    }

    fn block_on<Fut>(&self, future: Fut) -> Fut::Output
    where
        Fut: Future + Send,
        Fut::Output: Send,
    {
        match Handle::try_current() {
            Ok(current) if current.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| self.handle.block_on(future))
            }
            // A current_thread runtime cannot block in place; wait elsewhere.
            Ok(_) => std::thread::scope(|scope| {
                match scope.spawn(|| self.handle.block_on(future)).join() {
                    Ok(output) => output,
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }),
            Err(_) => self.handle.block_on(future),
        }
    }
}

impl Drop for BatchExecutor {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

async fn drain<E: fmt::Display + 'static>(
    label: &'static str,
    tasks: &mut JoinSet<Result<(), E>>,
    report: &mut BatchReport,
) {
    while let Some(outcome) = tasks.join_next().await {
        match outcome {
            Ok(Ok(())) => report.completed += 1,
            Ok(Err(err)) => {
                report.failed += 1;
                warn!("{label}: task failed: {err}");
            }
            Err(err) if err.is_cancelled() => {
                report.cancelled += 1;
                warn!("{label}: task cancelled: {err}");
            }
            Err(err) => {
                report.panicked += 1;
                error!("{label}: task panicked: {err}");
            }
        }
    }
}
