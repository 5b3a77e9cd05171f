//! # elastipool
//!
//! `elastipool` is a Rust library that provides a dynamically-sized thread
//! pool with a bounded task queue, submission backpressure, and idle-worker
//! reclamation.
//!
//! ## Features
//! - Submit closures or [`Task`] implementors and retrieve their results
//!   through a blocking [`JobHandle`].
//! - Fixed mode: a constant worker count for the pool's entire lifetime.
//! - Elastic mode: the pool grows one worker at a time under queue pressure
//!   (up to a configured maximum) and reclaims workers that idle past a
//!   threshold, never shrinking below the initial count.
//! - Bounded FIFO queue: submission blocks up to one second for space, then
//!   rejects non-fatally with an invalid handle.
//! - Panic containment: a panicking task is reported through its handle and
//!   never takes a worker down.
//! - Graceful shutdown: the queue is drained and every worker joined.
//! - Metrics collection for monitoring pool activity.
//!
//! ## Usage
//!
//! ### Basic Usage
//! ```rust
//! use elastipool::ThreadPoolBuilder;
//!
//! // A fixed pool with 4 workers
//! let pool = ThreadPoolBuilder::new().initial_threads(4).build();
//!
//! // Submit a task and retrieve its result
//! let handle = pool.spawn(|| 21 * 2);
//! assert_eq!(handle.join().unwrap(), 42);
//!
//! // Shut down the pool
//! pool.shutdown();
//! ```
//!
//! ### Elastic Mode
//! ```rust
//! use elastipool::ThreadPoolBuilder;
//! use std::time::Duration;
//!
//! // Start with 2 workers, grow up to 8 under load, reclaim after 60s idle
//! let pool = ThreadPoolBuilder::new()
//!     .initial_threads(2)
//!     .elastic(8)
//!     .idle_timeout(Duration::from_secs(60))
//!     .build();
//!
//! let handles: Vec<_> = (0..8usize).map(|i| pool.spawn(move || i * i)).collect();
//! for (i, handle) in handles.into_iter().enumerate() {
//!     assert_eq!(handle.join().unwrap(), i * i);
//! }
//!
//! pool.shutdown();
//! ```
//!
//! ### Handling Rejection and Panics
//! ```rust
//! use elastipool::{PoolError, ThreadPoolBuilder};
//!
//! let pool = ThreadPoolBuilder::new().initial_threads(2).build();
//!
//! let handle = pool.spawn(|| -> u32 { panic!("boom") });
//! assert_eq!(handle.join(), Err(PoolError::TaskPanicked));
//!
//! // The pool is unharmed
//! assert_eq!(pool.spawn(|| 7).join().unwrap(), 7);
//! pool.shutdown();
//! ```
//!
//! ### Collecting Metrics
//! ```rust
//! use elastipool::{metrics::{AtomicMetricsCollector, PoolMetrics}, ThreadPoolBuilder};
//! use std::sync::Arc;
//!
//! let metrics = Arc::new(PoolMetrics::new());
//! let collector = Arc::new(AtomicMetricsCollector::new(metrics.clone()));
//!
//! let pool = ThreadPoolBuilder::new()
//!     .initial_threads(4)
//!     .with_metrics_collector(collector)
//!     .build();
//!
//! let handles: Vec<_> = (0..5).map(|i| pool.spawn(move || i)).collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! pool.shutdown();
//!
//! use std::sync::atomic::Ordering;
//! assert_eq!(metrics.completed_tasks.load(Ordering::SeqCst), 5);
//! assert_eq!(metrics.active_threads.load(Ordering::SeqCst), 0);
//! ```

mod errors;
mod macros;
pub mod metrics;
pub mod pool;
mod queue;

pub use errors::PoolError;
pub use pool::modes::{ElasticMode, FixedMode, ScalingMode};
pub use pool::task::{JobHandle, Task};
pub use pool::{ThreadPool, ThreadPoolBuilder};

#[cfg(any(debug_assertions, test, feature = "bench"))]
use pool::task::Job;

/// Runs a set of jobs with one freshly spawned thread per job, joining them
/// all. The unpooled baseline the benchmarks compare against.
///
/// # Example
/// ```rust
/// use elastipool::run_unpooled;
///
/// let jobs: Vec<_> = (0..4)
///     .map(|i| Box::new(move || println!("job {} executed", i)) as Box<dyn FnOnce() + Send>)
///     .collect();
///
/// run_unpooled(jobs);
/// ```
#[cfg(any(debug_assertions, test, feature = "bench"))]
pub fn run_unpooled(jobs: Vec<Job>) {
    let handles: Vec<_> = jobs
        .into_iter()
        .map(|job| std::thread::spawn(job))
        .collect();

    for h in handles {
        let _ = h.join();
    }
}
