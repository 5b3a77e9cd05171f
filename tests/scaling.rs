//! Elastic scaling behavior: growth under queue pressure, an upper bound at
//! the configured maximum, and idle reclamation back down to the initial
//! worker count.

use std::thread;
use std::time::{Duration, Instant};

use elastipool::ThreadPoolBuilder;

/// Polls `condition` until it holds or `deadline` elapses.
fn wait_for(deadline: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let started = Instant::now();
    while started.elapsed() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(50));
    }
    condition()
}

#[test]
fn test_elastic_pool_grows_under_burst() {
    let pool = ThreadPoolBuilder::new()
        .initial_threads(2)
        .queue_capacity(4)
        .elastic(8)
        .idle_timeout(Duration::from_millis(100))
        .build();
    assert_eq!(pool.mode(), "Elastic");
    assert_eq!(pool.current_threads(), 2);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            pool.spawn(move || {
                thread::sleep(Duration::from_millis(200));
                i
            })
        })
        .collect();

    // The burst outruns the two initial workers, so the growth check fires.
    let peak = pool.current_threads();
    assert!(peak > 2, "expected growth beyond 2 workers, got {peak}");
    assert!(peak <= 8, "growth must respect the maximum, got {peak}");

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), i);
    }

    // Idle reclamation runs on a one-second poll; give it a few ticks to
    // retire every surplus worker, and no further.
    let settled = wait_for(Duration::from_secs(5), || pool.current_threads() == 2);
    assert!(
        settled,
        "expected reclamation back to 2 workers, still at {}",
        pool.current_threads()
    );
    pool.shutdown();
}

#[test]
fn test_elastic_pool_never_exceeds_max() {
    let pool = ThreadPoolBuilder::new()
        .initial_threads(1)
        .elastic(3)
        .build();

    let handles: Vec<_> = (0..12)
        .map(|_| pool.spawn(|| thread::sleep(Duration::from_millis(100))))
        .collect();

    for _ in 0..20 {
        assert!(pool.current_threads() <= 3);
        thread::sleep(Duration::from_millis(20));
    }
    for handle in handles {
        handle.join().unwrap();
    }
    pool.shutdown();
}

#[test]
fn test_fixed_pool_thread_count_is_constant() {
    let pool = ThreadPoolBuilder::new().initial_threads(3).build();

    let handles: Vec<_> = (0..12)
        .map(|_| pool.spawn(|| thread::sleep(Duration::from_millis(50))))
        .collect();

    for _ in 0..10 {
        assert_eq!(pool.current_threads(), 3);
        thread::sleep(Duration::from_millis(20));
    }
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(pool.current_threads(), 3);
    pool.shutdown();
}

#[test]
fn test_initial_workers_survive_idling() {
    let pool = ThreadPoolBuilder::new()
        .initial_threads(2)
        .elastic(4)
        .idle_timeout(Duration::from_millis(100))
        .build();

    // Never loaded, so never grown; idling alone must not shrink the pool
    // below its initial count.
    thread::sleep(Duration::from_millis(2500));
    assert_eq!(pool.current_threads(), 2);
    assert_eq!(pool.spawn(|| 5).join().unwrap(), 5);
    pool.shutdown();
}
