//! Task and result-handle abstractions for the thread pool.

use std::panic::AssertUnwindSafe;
use std::sync::mpsc::{channel, Receiver};

use log::error;

use crate::errors::PoolError;

/// The erased unit of work carried by the task queue.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// A polymorphic unit of computation.
///
/// Implement this for task types that carry their own state; closures can be
/// submitted directly through [`ThreadPool::spawn`](crate::ThreadPool::spawn).
///
/// ```
/// use elastipool::{Task, ThreadPoolBuilder};
///
/// struct Increment(u64);
///
/// impl Task for Increment {
///     type Output = u64;
///     fn run(self) -> u64 {
///         self.0 + 1
///     }
/// }
///
/// let pool = ThreadPoolBuilder::new().initial_threads(2).build();
/// let handle = pool.submit(Increment(41));
/// assert_eq!(handle.join().unwrap(), 42);
/// pool.shutdown();
/// ```
pub trait Task: Send + 'static {
    /// The value this task produces.
    type Output: Send + 'static;

    /// Runs the computation, consuming the task.
    fn run(self) -> Self::Output;
}

enum HandleState<T> {
    /// Bound to an enqueued job; `recv` blocks until the worker delivers.
    Pending(Receiver<std::thread::Result<T>>),
    /// Submission was rejected; there is no job and nothing to wait for.
    Rejected,
}

/// The caller-visible handle for retrieving a task's result.
///
/// The executing worker delivers the result exactly once, and `join`
/// consumes the handle, so the value is retrieved exactly once per
/// successful submission.
pub struct JobHandle<T> {
    state: HandleState<T>,
}

impl<T> JobHandle<T> {
    /// Whether this handle is bound to a task that was actually enqueued.
    ///
    /// Returns `false` when submission was rejected under backpressure; in
    /// that case [`join`](Self::join) returns
    /// [`PoolError::QueueFull`] immediately without blocking.
    pub fn is_valid(&self) -> bool {
        matches!(self.state, HandleState::Pending(_))
    }

    /// Blocks until the bound task has run, then returns its result.
    ///
    /// Returns [`PoolError::TaskPanicked`] if the task panicked, and
    /// [`PoolError::Disconnected`] if the job was dropped without running.
    pub fn join(self) -> Result<T, PoolError> {
        match self.state {
            HandleState::Rejected => Err(PoolError::QueueFull),
            HandleState::Pending(rx) => match rx.recv() {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(_)) => Err(PoolError::TaskPanicked),
                Err(_) => Err(PoolError::Disconnected),
            },
        }
    }

    pub(crate) fn rejected() -> Self {
        Self {
            state: HandleState::Rejected,
        }
    }
}

/// Wraps a computation into an erased [`Job`] paired with the handle that
/// will receive its result.
///
/// The job catches panics so a faulting task never takes its worker thread
/// down with it; the panic is reported to the submitter through the handle.
pub fn package_job<F, T>(f: F) -> (Job, JobHandle<T>)
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = channel();
    let job = Box::new(move || {
        let result = std::panic::catch_unwind(AssertUnwindSafe(f));
        if result.is_err() {
            error!("task panicked during execution");
        }
        // The caller may have dropped the handle; delivery is best-effort.
        let _ = tx.send(result);
    });
    (
        job,
        JobHandle {
            state: HandleState::Pending(rx),
        },
    )
}
