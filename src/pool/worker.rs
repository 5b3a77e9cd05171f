//! Worker logic for the thread pool

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crossbeam::channel::{Receiver, RecvTimeoutError};
use log::{debug, trace};

use super::task::Job;
use super::{PoolCore, IDLE_POLL_INTERVAL};

pub struct WorkerHandle {
    id: usize,
    thread: Option<thread::JoinHandle<()>>,
}

impl WorkerHandle {
    pub fn new(id: usize, thread: thread::JoinHandle<()>) -> Self {
        Self {
            id,
            thread: Some(thread),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn join(&mut self) {
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// Spawns one worker, registers it, and accounts for it as idle.
///
/// Called from `build` for the initial worker set and from `spawn` when the
/// elastic growth check fires. The caller has already claimed the thread
/// slot in `current_threads`.
pub(crate) fn spawn_worker(core: &Arc<PoolCore>, jobs: Receiver<Job>) {
    let id = core.next_worker_id.fetch_add(1, Ordering::Relaxed);
    core.idle_threads.fetch_add(1, Ordering::SeqCst);

    let core_for_thread = Arc::clone(core);
    let handle = thread::Builder::new()
        .name(format!("pool-worker-{id}"))
        .spawn(move || worker_loop(core_for_thread, id, jobs))
        .expect("failed to spawn worker thread");

    core.workers
        .lock()
        .unwrap()
        .insert(id, WorkerHandle::new(id, handle));
    if let Some(m) = &core.metrics {
        m.on_worker_started();
    }
}

/// Worker thread main loop.
///
/// Blocks on the queue while idle; in elastic mode the wait is a 1 s poll so
/// the worker can check its idle-reclamation eligibility between jobs. The
/// queue disconnecting is the shutdown signal: buffered jobs are drained
/// first, so an enqueued task is never silently dropped.
fn worker_loop(core: Arc<PoolCore>, id: usize, jobs: Receiver<Job>) {
    let mut last_active = Instant::now();
    loop {
        let job = if let Some(idle_limit) = core.limits.idle_timeout {
            match jobs.recv_timeout(IDLE_POLL_INTERVAL) {
                Ok(job) => job,
                Err(RecvTimeoutError::Timeout) => {
                    if last_active.elapsed() >= idle_limit && try_retire_slot(&core) {
                        retire(&core, id);
                        return;
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match jobs.recv() {
                Ok(job) => job,
                Err(_) => break,
            }
        };

        trace!("worker {id}: executing job");
        core.idle_threads.fetch_sub(1, Ordering::SeqCst);
        if let Some(m) = &core.metrics {
            m.on_task_started();
        }

        job();

        if let Some(m) = &core.metrics {
            m.on_task_completed();
        }
        core.idle_threads.fetch_add(1, Ordering::SeqCst);
        last_active = Instant::now();
    }

    debug!("worker {id}: queue closed, exiting");
    core.current_threads.fetch_sub(1, Ordering::SeqCst);
    core.idle_threads.fetch_sub(1, Ordering::SeqCst);
    if let Some(m) = &core.metrics {
        m.on_worker_stopped();
    }
}

/// Claims one thread slot for retirement, refusing to shrink the pool below
/// its initial count. The CAS loop keeps two workers timing out together
/// from both retiring past the floor.
fn try_retire_slot(core: &PoolCore) -> bool {
    let mut current = core.current_threads.load(Ordering::SeqCst);
    while current > core.limits.initial_threads {
        match core.current_threads.compare_exchange(
            current,
            current - 1,
            Ordering::SeqCst,
            Ordering::SeqCst,
        ) {
            Ok(_) => return true,
            Err(actual) => current = actual,
        }
    }
    false
}

/// Routine elastic downsizing: the worker removes its own registry entry and
/// parks its join handle for shutdown to reap. The handle is moved while the
/// registry lock is held so shutdown never finds it in neither place.
fn retire(core: &PoolCore, id: usize) {
    debug!("worker {id}: idle past threshold, retiring");
    let mut workers = core.workers.lock().unwrap();
    if let Some(handle) = workers.remove(&id) {
        core.retired.lock().unwrap().push(handle);
    }
    drop(workers);

    core.idle_threads.fetch_sub(1, Ordering::SeqCst);
    if let Some(m) = &core.metrics {
        m.on_worker_stopped();
    }
}
