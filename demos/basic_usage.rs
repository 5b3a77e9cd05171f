fn main() {
    env_logger::init();

    let pool = elastipool::ThreadPoolBuilder::new().initial_threads(4).build();
    let handle = pool.spawn(|| {
        println!("Hello from the fixed thread pool!");
        10
    });
    let res = handle.join().unwrap();
    println!("Result from task: {}", res);
    pool.shutdown();
}
