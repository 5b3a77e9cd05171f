use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use elastipool::{PoolError, Task, ThreadPoolBuilder};

#[test]
fn test_basic_pool() {
    let pool = ThreadPoolBuilder::new().initial_threads(2).build();
    let handle = pool.spawn(|| 42);
    assert_eq!(handle.join().unwrap(), 42);
    pool.shutdown();
}

struct Increment(u64);

impl Task for Increment {
    type Output = u64;

    fn run(self) -> u64 {
        self.0 + 1
    }
}

#[test]
fn test_task_trait_submission() {
    let pool = ThreadPoolBuilder::new().initial_threads(2).build();
    let handle = pool.submit(Increment(9));
    assert_eq!(handle.join().unwrap(), 10);
    pool.shutdown();
}

#[test]
fn test_fixed_pool_runs_every_task_once() {
    let pool = ThreadPoolBuilder::new().initial_threads(4).build();
    assert_eq!(pool.mode(), "Fixed");
    assert_eq!(pool.current_threads(), 4);

    let executions = Arc::new(AtomicUsize::new(0));
    let handles: Vec<_> = (0..10u64)
        .map(|i| {
            let executions = Arc::clone(&executions);
            pool.spawn(move || {
                executions.fetch_add(1, Ordering::SeqCst);
                i + 1
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert!(handle.is_valid());
        assert_eq!(handle.join().unwrap(), i as u64 + 1);
    }
    assert_eq!(executions.load(Ordering::SeqCst), 10);
    assert_eq!(pool.current_threads(), 4);
    pool.shutdown();
}

#[test]
fn test_panic_is_contained() {
    let pool = ThreadPoolBuilder::new().initial_threads(2).build();

    let handle = pool.spawn(|| -> u32 { panic!("deliberate task failure") });
    assert_eq!(handle.join(), Err(PoolError::TaskPanicked));

    // The worker that ran the panicking task is still alive and serving.
    assert_eq!(pool.current_threads(), 2);
    assert_eq!(pool.spawn(|| 7).join().unwrap(), 7);
    pool.shutdown();
}

#[test]
fn test_backpressure_rejects_after_timeout() {
    let pool = ThreadPoolBuilder::new()
        .initial_threads(1)
        .queue_capacity(1)
        .build();

    // Occupy the single worker long enough to keep the queue full.
    let blocker = pool.spawn(|| thread::sleep(Duration::from_secs(3)));
    thread::sleep(Duration::from_millis(200));
    let queued = pool.spawn(|| 1);

    let started = Instant::now();
    let rejected = pool.spawn(|| 2);
    let waited = started.elapsed();

    assert!(!rejected.is_valid());
    assert!(
        waited >= Duration::from_millis(900),
        "submission should have blocked for the full timeout, waited {waited:?}"
    );
    // An invalid handle resolves immediately, without blocking.
    let started = Instant::now();
    assert_eq!(rejected.join(), Err(PoolError::QueueFull));
    assert!(started.elapsed() < Duration::from_millis(50));

    blocker.join().unwrap();
    assert_eq!(queued.join().unwrap(), 1);
    pool.shutdown();
}

#[test]
fn test_shutdown_drains_queued_tasks() {
    let executions = Arc::new(AtomicUsize::new(0));
    let pool = ThreadPoolBuilder::new().initial_threads(2).build();

    for _ in 0..8 {
        let executions = Arc::clone(&executions);
        pool.spawn(move || {
            thread::sleep(Duration::from_millis(50));
            executions.fetch_add(1, Ordering::SeqCst);
        });
    }

    // Shutdown must block until every accepted task has run.
    pool.shutdown();
    assert_eq!(executions.load(Ordering::SeqCst), 8);
}

#[test]
fn test_drop_joins_workers() {
    let executions = Arc::new(AtomicUsize::new(0));
    {
        let pool = ThreadPoolBuilder::new().initial_threads(2).build();
        for _ in 0..4 {
            let executions = Arc::clone(&executions);
            pool.spawn(move || {
                executions.fetch_add(1, Ordering::SeqCst);
            });
        }
        // Implicit drop here behaves like shutdown.
    }
    assert_eq!(executions.load(Ordering::SeqCst), 4);
}
