//! Metrics collection for the thread pool.
//!
//! This module defines the `MetricsCollector` trait for collecting metrics
//! about the thread pool's activity, as well as a default implementation
//! backed by atomic counters.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A trait for collecting metrics from the thread pool.
///
/// Implementations of this trait provide hooks to track key events in the
/// pool: task submission and rejection, execution, and worker lifecycle
/// changes. All hooks are called from either the submitting thread or a
/// worker thread, so implementations must be thread-safe.
pub trait MetricsCollector: Send + Sync {
    /// Called when a task is accepted into the queue.
    fn on_task_submitted(&self);
    /// Called when a submission is rejected under backpressure.
    fn on_task_rejected(&self);
    /// Called when a worker starts executing a task.
    fn on_task_started(&self);
    /// Called when a task completes execution.
    fn on_task_completed(&self);
    /// Called when a worker thread starts.
    fn on_worker_started(&self);
    /// Called when a worker thread stops, whether retired or shut down.
    fn on_worker_stopped(&self);
}

/// Stores thread pool metrics in atomic counters.
pub struct PoolMetrics {
    /// Number of tasks currently queued for execution.
    pub queued_tasks: AtomicUsize,
    /// Number of tasks currently being executed.
    pub running_tasks: AtomicUsize,
    /// Total number of tasks that have completed execution.
    pub completed_tasks: AtomicUsize,
    /// Total number of submissions rejected because the queue stayed full.
    pub rejected_tasks: AtomicUsize,
    /// Number of worker threads currently alive.
    pub active_threads: AtomicUsize,
}

impl PoolMetrics {
    /// Creates a new `PoolMetrics` with all counters at zero.
    pub fn new() -> Self {
        Self {
            queued_tasks: AtomicUsize::new(0),
            running_tasks: AtomicUsize::new(0),
            completed_tasks: AtomicUsize::new(0),
            rejected_tasks: AtomicUsize::new(0),
            active_threads: AtomicUsize::new(0),
        }
    }
}

impl Default for PoolMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A default `MetricsCollector` that updates shared [`PoolMetrics`]
/// counters.
pub struct AtomicMetricsCollector {
    /// Shared metrics storage.
    pub metrics: Arc<PoolMetrics>,
}

impl AtomicMetricsCollector {
    /// Creates a collector writing into the provided metrics.
    pub fn new(metrics: Arc<PoolMetrics>) -> Self {
        Self { metrics }
    }
}

impl MetricsCollector for AtomicMetricsCollector {
    fn on_task_submitted(&self) {
        self.metrics.queued_tasks.fetch_add(1, Ordering::SeqCst);
    }

    fn on_task_rejected(&self) {
        self.metrics.rejected_tasks.fetch_add(1, Ordering::SeqCst);
    }

    fn on_task_started(&self) {
        self.metrics.queued_tasks.fetch_sub(1, Ordering::SeqCst);
        self.metrics.running_tasks.fetch_add(1, Ordering::SeqCst);
    }

    fn on_task_completed(&self) {
        self.metrics.running_tasks.fetch_sub(1, Ordering::SeqCst);
        self.metrics.completed_tasks.fetch_add(1, Ordering::SeqCst);
    }

    fn on_worker_started(&self) {
        self.metrics.active_threads.fetch_add(1, Ordering::SeqCst);
    }

    fn on_worker_stopped(&self) {
        self.metrics.active_threads.fetch_sub(1, Ordering::SeqCst);
    }
}
