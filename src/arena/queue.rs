//! Double-buffered task queue.
//!
//! Producers append to the pending buffer from any thread; the single thread
//! hosting the arena loop swaps pending into active and drains it. With two
//! buffers no queue lock is held while a task executes, so a task may append
//! to, or stop, the arena from inside its own `execute`.

use std::collections::VecDeque;
use std::mem;

use parking_lot::{Condvar, Mutex};

use super::task::TaskRef;

/// Double-buffered FIFO of shared task handles.
///
/// The `pending` buffer receives every `append`; the `active` buffer is only
/// ever touched by the thread hosting the loop.
#[derive(Default)]
pub struct TaskQueue {
    /// Batch currently being drained. Loop thread only.
    active: Mutex<VecDeque<TaskRef>>,
    /// Batch accumulating new submissions. Any producer thread.
    pending: Mutex<VecDeque<TaskRef>>,
    /// Signaled on append and on stop requests, so an idle loop wakes up.
    ready: Condvar,
}

impl TaskQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task to the pending buffer and wake the loop if it idles.
    ///
    /// Safe from any thread, including from inside a task currently being
    /// drained: only the pending lock is taken, and only for the push.
    pub fn append(
        &self,
        task: TaskRef,
    ) {
        let mut pending = self.pending.lock();
        pending.push_back(task);
        self.ready.notify_one();
    }

    /// Exchange the buffers and return the new active length.
    ///
    /// What was pending becomes the batch to drain; the drained-out active
    /// buffer becomes the new, empty pending buffer. Loop thread only.
    pub fn swap(&self) -> usize {
        let mut active = self.active.lock();
        let mut pending = self.pending.lock();
        mem::swap(&mut *active, &mut *pending);
        active.len()
    }

    /// Execute every active task in submission order.
    ///
    /// The lock is held only to pop the front; `execute` runs with no lock
    /// held.
    pub fn drain(&self) {
        loop {
            let task = self.active.lock().pop_front();
            match task {
                Some(task) => task.execute(),
                None => break,
            }
        }
    }

    /// Wake every waiter regardless of queue content.
    ///
    /// Used by the stop paths: the pending lock is taken first so the wakeup
    /// cannot slip between a waiter's emptiness check and its wait.
    pub fn wake(&self) {
        let _pending = self.pending.lock();
        self.ready.notify_all();
    }

    /// Block until a task is pending or `interrupted` reports true.
    pub fn wait_until(
        &self,
        mut interrupted: impl FnMut() -> bool,
    ) {
        let mut pending = self.pending.lock();
        while pending.is_empty() && !interrupted() {
            self.ready.wait(&mut pending);
        }
    }

    /// Number of tasks waiting in the pending buffer.
    pub fn pending_len(&self) -> usize {
        self.pending.lock().len()
    }

    /// True when no submission is waiting to be swapped in.
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}
