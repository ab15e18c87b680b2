//! Asynchronous task completion tracking.
//!
//! Mutating calls that the backend executes asynchronously answer with a task
//! id. [`await_task`] turns that into a blocking-with-timeout call: it sleeps
//! one interval, reads the task, and repeats until the task succeeds, fails,
//! the time budget runs out or the caller cancels.
//!
//! The first status read happens only after a full interval, so even a task
//! that is already finished takes at least `interval` to observe.

use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::ApiError;
use crate::traits::TaskReader;
use crate::types::TaskStatus;

/// Interval used by the predefined poll profiles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Timing of one poll session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    /// Total wall-clock budget.
    pub timeout: Duration,
    /// Constant delay before every status read.
    pub interval: Duration,
}

impl PollOptions {
    /// Quick operations such as policy assignment.
    pub const FAST: Self = Self::new(Duration::from_secs(300), DEFAULT_POLL_INTERVAL);
    /// Slow operations such as organizational-unit deletion.
    pub const SLOW: Self = Self::new(Duration::from_secs(3600), DEFAULT_POLL_INTERVAL);

    pub const fn new(timeout: Duration, interval: Duration) -> Self {
        Self { timeout, interval }
    }

    pub fn validate(&self) -> Result<(), TaskError> {
        if self.timeout.is_zero() {
            return Err(TaskError::InvalidOptions(
                "timeout must be greater than zero".to_string(),
            ));
        }
        if self.interval.is_zero() {
            return Err(TaskError::InvalidOptions(
                "interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Worst-case number of status reads, `ceil(timeout / interval)`.
    pub fn max_fetches(&self) -> u128 {
        let interval = self.interval.as_nanos().max(1);
        self.timeout.as_nanos().div_ceil(interval)
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self::FAST
    }
}

/// Why a poll session ended without the task succeeding.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Timeout or interval was zero.
    #[error("invalid poll options: {0}")]
    InvalidOptions(String),

    /// Reading the task status failed. Not retried.
    #[error("failed to query task {task_id}: {source}")]
    QueryFailed {
        task_id: String,
        #[source]
        source: ApiError,
    },

    /// The backend reports the task as failed or aborted.
    #[error("task {task_id} {status}: {}", .reason.as_deref().unwrap_or("no reason given by the backend"))]
    TaskFailed {
        task_id: String,
        status: TaskStatus,
        reason: Option<String>,
    },

    /// No terminal status was observed within the budget.
    #[error("timed out after {}s waiting for task {task_id}", .timeout.as_secs())]
    TimeoutExceeded { task_id: String, timeout: Duration },

    /// The caller's cancellation token fired while waiting.
    #[error("cancelled while waiting for task {task_id}")]
    Cancelled { task_id: String },
}

impl TaskError {
    /// Task id the session was tracking, if it got that far.
    pub fn task_id(&self) -> Option<&str> {
        match self {
            Self::InvalidOptions(_) => None,
            Self::QueryFailed { task_id, .. }
            | Self::TaskFailed { task_id, .. }
            | Self::TimeoutExceeded { task_id, .. }
            | Self::Cancelled { task_id } => Some(task_id),
        }
    }
}

/// Block until `task_id` reaches a terminal status, the budget in `options`
/// is spent, or `cancel` fires.
///
/// Every tick sleeps `options.interval` and then performs exactly one status
/// read. A read error (404 included) ends the session at once as
/// [`TaskError::QueryFailed`]. No read is issued once the deadline has passed.
/// Cancellation is observed during the sleep only; an in-flight read is
/// allowed to finish.
pub async fn await_task<R>(
    reader: &R,
    task_id: &str,
    options: PollOptions,
    cancel: &CancellationToken,
) -> Result<(), TaskError>
where
    R: TaskReader + ?Sized,
{
    options.validate()?;

    let started = Instant::now();
    let deadline = started + options.timeout;
    let mut fetches: u32 = 0;

    log::debug!(
        "Waiting for task {task_id} (timeout {}s, interval {}ms, at most {} checks)",
        options.timeout.as_secs(),
        options.interval.as_millis(),
        options.max_fetches()
    );

    loop {
        if Instant::now() >= deadline {
            log::warn!("Task {task_id} still running after {fetches} checks, giving up");
            return Err(TaskError::TimeoutExceeded {
                task_id: task_id.to_string(),
                timeout: options.timeout,
            });
        }

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                log::warn!("Stopped waiting for task {task_id}: cancelled");
                return Err(TaskError::Cancelled {
                    task_id: task_id.to_string(),
                });
            }
            () = tokio::time::sleep(options.interval) => {}
        }

        if Instant::now() > deadline {
            log::warn!("Task {task_id} still running at deadline after {fetches} checks");
            return Err(TaskError::TimeoutExceeded {
                task_id: task_id.to_string(),
                timeout: options.timeout,
            });
        }

        fetches += 1;
        let task = reader
            .read_task(task_id)
            .await
            .map_err(|source| TaskError::QueryFailed {
                task_id: task_id.to_string(),
                source,
            })?;

        if task.status.is_success() {
            log::info!(
                "Task {task_id} succeeded after {:.1}s ({fetches} checks)",
                started.elapsed().as_secs_f32()
            );
            return Ok(());
        }

        if task.status.is_failure() {
            log::warn!("Task {task_id} {}: {:?}", task.status, task.reason);
            return Err(TaskError::TaskFailed {
                task_id: task_id.to_string(),
                status: task.status,
                reason: task.reason,
            });
        }

        log::debug!("Task {task_id} is {} (check {fetches})", task.status);
    }
}
