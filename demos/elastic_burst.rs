use std::thread;
use std::time::Duration;

use elastipool::ThreadPoolBuilder;

fn main() {
    env_logger::init();

    let pool = ThreadPoolBuilder::new()
        .initial_threads(2)
        .queue_capacity(4)
        .elastic(8)
        .idle_timeout(Duration::from_secs(2))
        .build();

    println!("pool started with {} workers", pool.current_threads());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            pool.spawn(move || {
                thread::sleep(Duration::from_millis(200));
                i
            })
        })
        .collect();
    println!("burst submitted, now at {} workers", pool.current_threads());

    for handle in handles {
        let _ = handle.join();
    }

    // Watch idle reclamation bring the pool back toward its initial size.
    for _ in 0..5 {
        thread::sleep(Duration::from_secs(1));
        println!(
            "{} workers, {} idle",
            pool.current_threads(),
            pool.idle_threads()
        );
    }

    pool.shutdown();
    println!("pool shut down");
}
