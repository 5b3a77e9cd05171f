pub mod modes;
pub mod task;
mod worker;

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use log::{debug, warn};

use crate::metrics::MetricsCollector;
use crate::queue::TaskQueue;
use modes::{ElasticMode, FixedMode, ScalingMode};
use task::{package_job, Job, JobHandle, Task};
use worker::{spawn_worker, WorkerHandle};

/// How long `spawn` waits for queue space before rejecting a submission.
/// Fixed at submission time, not configurable per call.
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(1);

/// How often an idle elastic worker wakes to check its reclamation
/// eligibility. Fixed-mode workers block indefinitely instead.
pub(crate) const IDLE_POLL_INTERVAL: Duration = Duration::from_secs(1);

const DEFAULT_QUEUE_CAPACITY: usize = 1024;
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Immutable scaling thresholds, chosen at build time.
pub(crate) struct ScalingLimits {
    /// Worker count at start; elastic pools never shrink below this.
    pub initial_threads: usize,
    /// Upper bound on workers. Equal to `initial_threads` in fixed mode, so
    /// the growth check can never fire there.
    pub max_threads: usize,
    /// Idle span after which a surplus worker retires. `None` in fixed mode.
    pub idle_timeout: Option<Duration>,
}

/// State shared between the pool handle and its workers.
pub(crate) struct PoolCore {
    pub current_threads: AtomicUsize,
    pub idle_threads: AtomicUsize,
    /// Pool-scoped monotonic id source, so concurrent pools don't collide.
    pub next_worker_id: AtomicUsize,
    /// Live workers by id. A retiring elastic worker removes its own entry.
    pub workers: Mutex<HashMap<usize, WorkerHandle>>,
    /// Join handles of self-retired workers, reaped at shutdown.
    pub retired: Mutex<Vec<WorkerHandle>>,
    pub limits: ScalingLimits,
    pub metrics: Option<Arc<dyn MetricsCollector>>,
}

/// A thread pool with a bounded FIFO task queue and a fixed or elastic
/// scaling policy.
///
/// Dropping the pool (or calling [`shutdown`](Self::shutdown)) closes the
/// queue, lets every worker drain and finish its current task, and joins
/// them all before returning.
pub struct ThreadPool<M: ScalingMode> {
    core: Arc<PoolCore>,
    /// The only sender into the task queue; taking it closes the queue.
    queue: Option<TaskQueue<Job>>,
    mode: M,
}

impl<M: ScalingMode> ThreadPool<M> {
    /// Submits a closure for execution, returning the handle through which
    /// its result is retrieved.
    ///
    /// Blocks up to one second for queue space under backpressure. On
    /// timeout the submission is rejected: the returned handle is invalid
    /// and its `join` yields [`PoolError::QueueFull`](crate::PoolError)
    /// immediately. Rejection is non-fatal; the pool keeps running.
    pub fn spawn<F, T>(&self, f: F) -> JobHandle<T>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let queue = self.queue.as_ref().expect("pool is shut down");
        let (job, handle) = package_job(f);
        match queue.push_timeout(job, SUBMIT_TIMEOUT) {
            Ok(()) => {
                if let Some(m) = &self.core.metrics {
                    m.on_task_submitted();
                }
                self.grow_if_pressed(queue);
                handle
            }
            Err(_rejected_job) => {
                warn!(
                    "task queue full for {}s, rejecting submission",
                    SUBMIT_TIMEOUT.as_secs()
                );
                if let Some(m) = &self.core.metrics {
                    m.on_task_rejected();
                }
                JobHandle::rejected()
            }
        }
    }

    /// Submits a [`Task`] implementor. Equivalent to `spawn(|| task.run())`.
    pub fn submit<T: Task>(&self, t: T) -> JobHandle<T::Output> {
        self.spawn(move || t.run())
    }

    /// Shuts the pool down, blocking until every worker has exited.
    ///
    /// Workers finish their current task and drain any still-queued jobs
    /// before exiting, so no accepted task is dropped. Dropping the pool
    /// has the same effect.
    pub fn shutdown(mut self) {
        self.stop_and_join();
    }

    /// Current number of worker threads.
    pub fn current_threads(&self) -> usize {
        self.core.current_threads.load(Ordering::SeqCst)
    }

    /// Number of workers currently waiting for work.
    pub fn idle_threads(&self) -> usize {
        self.core.idle_threads.load(Ordering::SeqCst)
    }

    /// Number of tasks waiting in the queue.
    pub fn queued_tasks(&self) -> usize {
        self.queue.as_ref().map(TaskQueue::len).unwrap_or(0)
    }

    pub fn mode(&self) -> &'static str {
        self.mode.mode()
    }

    /// Elastic growth check, run after each successful submission: if
    /// pending tasks outnumber idle workers and the pool is below its
    /// maximum, start one more worker before returning to the caller. In
    /// fixed mode `max_threads == initial_threads`, so this never fires.
    ///
    /// The thread slot is claimed with a CAS so concurrent submitters can
    /// never grow the pool past its maximum together.
    fn grow_if_pressed(&self, queue: &TaskQueue<Job>) {
        loop {
            let pending = queue.len();
            let idle = self.core.idle_threads.load(Ordering::SeqCst);
            let current = self.core.current_threads.load(Ordering::SeqCst);
            if pending <= idle || current >= self.core.limits.max_threads {
                return;
            }
            if self
                .core
                .current_threads
                .compare_exchange(current, current + 1, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                debug!("queue pressure ({pending} pending, {idle} idle), starting worker");
                spawn_worker(&self.core, queue.receiver());
                return;
            }
        }
    }

    fn stop_and_join(&mut self) {
        let Some(queue) = self.queue.take() else {
            return;
        };
        debug!(
            "shutting down pool with {} workers, {} queued tasks",
            self.core.current_threads.load(Ordering::SeqCst),
            queue.len()
        );
        // Closing the queue wakes every blocked worker; each drains
        // remaining jobs and exits on disconnect.
        drop(queue);

        let mut live: Vec<WorkerHandle> = {
            let mut workers = self.core.workers.lock().unwrap();
            workers.drain().map(|(_, handle)| handle).collect()
        };
        for handle in &mut live {
            handle.join();
            debug!("joined worker {}", handle.id());
        }
        // Workers that retired themselves before shutdown parked their
        // handles here; they are already finished or about to be.
        let mut retired: Vec<WorkerHandle> = {
            let mut retired = self.core.retired.lock().unwrap();
            retired.drain(..).collect()
        };
        for handle in &mut retired {
            handle.join();
        }
    }
}

impl<M: ScalingMode> Drop for ThreadPool<M> {
    fn drop(&mut self) {
        self.stop_and_join();
    }
}

/// States for the ThreadPoolBuilder
pub struct FixedState; // constant worker count
pub struct ElasticState; // grows under load, shrinks when idle

/// Typed-state Builder Pattern
///
/// Configuration is immutable once `build` has started the pool, and
/// elastic-only options exist only on the elastic builder state, so
/// misconfiguration is unrepresentable rather than silently ignored at
/// runtime.
pub struct ThreadPoolBuilder<S = FixedState> {
    initial_threads: usize,
    queue_capacity: usize,
    max_threads: usize,
    idle_timeout: Duration,
    metrics_collector: Option<Arc<dyn MetricsCollector>>,
    _state: PhantomData<S>,
}

impl<S> ThreadPoolBuilder<S> {
    /// Upper bound on queued-but-unstarted tasks; submissions past it block
    /// and then reject.
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_metrics_collector(mut self, collector: Arc<dyn MetricsCollector>) -> Self {
        self.metrics_collector = Some(collector);
        self
    }
}

impl ThreadPoolBuilder<FixedState> {
    pub fn new() -> Self {
        Self {
            initial_threads: num_cpus::get(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_threads: 0,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            metrics_collector: None,
            _state: PhantomData,
        }
    }

    /// Number of workers started with the pool. Defaults to the number of
    /// logical CPUs.
    pub fn initial_threads(mut self, n: usize) -> Self {
        self.initial_threads = n;
        self
    }

    /// Switches to the elastic scaling policy, allowing the pool to grow up
    /// to `max_threads` workers under load.
    pub fn elastic(self, max_threads: usize) -> ThreadPoolBuilder<ElasticState> {
        ThreadPoolBuilder {
            initial_threads: self.initial_threads,
            queue_capacity: self.queue_capacity,
            max_threads: max_threads.max(self.initial_threads),
            idle_timeout: self.idle_timeout,
            metrics_collector: self.metrics_collector,
            _state: PhantomData,
        }
    }

    /// Starts a fixed-mode pool: the worker count never changes until
    /// shutdown.
    pub fn build(self) -> ThreadPool<FixedMode> {
        let limits = ScalingLimits {
            initial_threads: self.initial_threads,
            max_threads: self.initial_threads,
            idle_timeout: None,
        };
        build_pool(
            limits,
            self.queue_capacity,
            self.metrics_collector,
            FixedMode,
        )
    }
}

impl Default for ThreadPoolBuilder<FixedState> {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadPoolBuilder<ElasticState> {
    /// How long a surplus worker may sit idle before it is reclaimed.
    /// Defaults to 60 seconds. Checked at a one-second polling granularity.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Starts an elastic-mode pool with `initial_threads` workers.
    pub fn build(self) -> ThreadPool<ElasticMode> {
        let limits = ScalingLimits {
            initial_threads: self.initial_threads,
            max_threads: self.max_threads,
            idle_timeout: Some(self.idle_timeout),
        };
        build_pool(
            limits,
            self.queue_capacity,
            self.metrics_collector,
            ElasticMode,
        )
    }
}

fn build_pool<M: ScalingMode>(
    limits: ScalingLimits,
    queue_capacity: usize,
    metrics: Option<Arc<dyn MetricsCollector>>,
    mode: M,
) -> ThreadPool<M> {
    let queue = TaskQueue::bounded(queue_capacity);
    let initial = limits.initial_threads;
    let core = Arc::new(PoolCore {
        // The initial thread slots are claimed up front; `spawn_worker`
        // only accounts for idleness.
        current_threads: AtomicUsize::new(initial),
        idle_threads: AtomicUsize::new(0),
        next_worker_id: AtomicUsize::new(0),
        workers: Mutex::new(HashMap::new()),
        retired: Mutex::new(Vec::new()),
        limits,
        metrics,
    });

    for _ in 0..initial {
        spawn_worker(&core, queue.receiver());
    }
    debug!("pool started with {initial} workers ({} mode)", mode.mode());

    ThreadPool {
        core,
        queue: Some(queue),
        mode,
    }
}
