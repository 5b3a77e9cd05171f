//! # Macros for `elastipool`
//!
//! Convenience macros that reduce boilerplate when submitting work and
//! inspecting pool metrics.

/// Simplifies submitting work to the thread pool.
///
/// Accepts either a closure or (with the `task:` form) a [`Task`](crate::Task)
/// implementor.
///
/// # Examples
/// ```rust
/// use elastipool::{submit_task, ThreadPoolBuilder};
///
/// let pool = ThreadPoolBuilder::new().initial_threads(2).build();
///
/// let handle = submit_task!(pool, || 1 + 1);
/// assert_eq!(handle.join().unwrap(), 2);
///
/// pool.shutdown();
/// ```
#[macro_export]
macro_rules! submit_task {
    ($pool:expr, task: $task:expr) => {
        $pool.submit($task)
    };
    ($pool:expr, $f:expr) => {
        $pool.spawn($f)
    };
}

/// Logs the current metrics of the thread pool.
///
/// Prints the number of queued, running, completed, and rejected tasks, as
/// well as the number of active worker threads.
///
/// # Example
/// ```rust
/// use elastipool::{log_metrics, metrics::{AtomicMetricsCollector, PoolMetrics}, ThreadPoolBuilder};
/// use std::sync::Arc;
///
/// let metrics = Arc::new(PoolMetrics::new());
/// let collector = Arc::new(AtomicMetricsCollector::new(metrics.clone()));
/// let pool = ThreadPoolBuilder::new().with_metrics_collector(collector).build();
///
/// log_metrics!(metrics);
/// pool.shutdown();
/// ```
#[macro_export]
macro_rules! log_metrics {
    ($metrics:expr) => {
        println!(
            "Queued tasks: {}",
            $metrics
                .queued_tasks
                .load(std::sync::atomic::Ordering::SeqCst)
        );
        println!(
            "Running tasks: {}",
            $metrics
                .running_tasks
                .load(std::sync::atomic::Ordering::SeqCst)
        );
        println!(
            "Completed tasks: {}",
            $metrics
                .completed_tasks
                .load(std::sync::atomic::Ordering::SeqCst)
        );
        println!(
            "Rejected tasks: {}",
            $metrics
                .rejected_tasks
                .load(std::sync::atomic::Ordering::SeqCst)
        );
        println!(
            "Active threads: {}",
            $metrics
                .active_threads
                .load(std::sync::atomic::Ordering::SeqCst)
        );
    };
}
