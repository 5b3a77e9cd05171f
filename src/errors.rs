//! Error types for the thread pool.
//!
//! Submission failure and task faults are reported through the `JobHandle`
//! returned at submission time, so these errors surface from
//! [`JobHandle::join`](crate::JobHandle::join) rather than from `spawn` itself.

/// Represents errors that can occur while retrieving a task's result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// The task queue stayed full past the submission timeout; the task was
    /// never enqueued and never ran.
    QueueFull,
    /// The task panicked while running. The panic was contained by the
    /// executing worker and did not reduce the pool's capacity.
    TaskPanicked,
    /// The job was dropped without ever delivering a result.
    Disconnected,
}

impl std::fmt::Display for PoolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoolError::QueueFull => write!(f, "task queue is full, submission rejected"),
            PoolError::TaskPanicked => write!(f, "task panicked during execution"),
            PoolError::Disconnected => write!(f, "task was dropped without producing a result"),
        }
    }
}

impl std::error::Error for PoolError {}
