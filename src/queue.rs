//! Bounded FIFO queue for pending tasks.
//!
//! Built on crossbeam's bounded MPMC channel: producers block (with a
//! timeout) when the queue is at capacity, and idle workers block on the
//! receiving side until work arrives or the queue is closed.

use std::time::Duration;

use crossbeam::channel::{bounded, Receiver, Sender};

pub struct TaskQueue<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
}

impl<T> TaskQueue<T> {
    pub fn bounded(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity);
        Self { tx, rx }
    }

    /// Enqueues `item`, waiting up to `timeout` for space if the queue is
    /// full. On timeout the item is handed back to the caller.
    pub fn push_timeout(&self, item: T, timeout: Duration) -> Result<(), T> {
        self.tx.send_timeout(item, timeout).map_err(|e| e.into_inner())
    }

    /// Number of items currently waiting in the queue.
    pub fn len(&self) -> usize {
        self.tx.len()
    }

    /// A receiving end for a worker. Dropping the `TaskQueue` (the only
    /// sender) closes the channel; receivers drain buffered items and then
    /// observe disconnection.
    pub fn receiver(&self) -> Receiver<T> {
        self.rx.clone()
    }
}
