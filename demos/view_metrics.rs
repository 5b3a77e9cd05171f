use elastipool::{
    log_metrics,
    metrics::{AtomicMetricsCollector, PoolMetrics},
    ThreadPoolBuilder,
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;
use std::time::Duration;

fn main() {
    env_logger::init();

    // Create metrics and collector
    let metrics = Arc::new(PoolMetrics::new());
    let collector = Arc::new(AtomicMetricsCollector::new(metrics.clone()));

    // An elastic pool so the active-thread count visibly moves
    let pool = ThreadPoolBuilder::new()
        .initial_threads(2)
        .with_metrics_collector(collector)
        .elastic(6)
        .idle_timeout(Duration::from_secs(2))
        .build();

    // Create a flag to stop monitoring
    let running = Arc::new(AtomicBool::new(true));

    // Spawn a monitoring thread to display live updates
    let metrics_clone = metrics.clone();
    let running_clone = running.clone();
    let monitor_handle = thread::spawn(move || {
        while running_clone.load(Ordering::Acquire) {
            println!("\n--- Metrics ---");
            log_metrics!(metrics_clone);
            thread::sleep(Duration::from_millis(250));
        }
    });

    // A burst big enough to trigger elastic growth
    for _ in 0..20 {
        pool.spawn(move || {
            thread::sleep(Duration::from_millis(100)); // Simulate work
        });
    }

    thread::sleep(Duration::from_millis(1000)); // Wait for tasks to start

    // Wait for the thread pool to complete tasks
    pool.shutdown();

    // Stop the monitoring thread
    running.store(false, Ordering::Release);
    monitor_handle.join().unwrap();

    // Final metrics after shutdown
    println!("\n--- Final Metrics ---");
    log_metrics!(metrics);
}
