//! The arena run loop.
//!
//! One `CycleExecutor` is shared between the controller handle and whichever
//! thread hosts the loop. The loop itself is thread-agnostic: managed mode
//! runs it on a spawned thread, captured mode on the caller's thread, with
//! identical semantics.

use std::sync::atomic::{AtomicU8, Ordering};

use tracing::{debug, trace};

use super::queue::TaskQueue;
use super::signal::{StopSignal, StopState};

/// Observable state of the run loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecState {
    /// Waiting for work, or not yet hosted.
    Idle,
    /// Executing an active batch.
    Draining,
    /// The loop has exited; no further task will run.
    Stopped,
}

impl ExecState {
    /// Convert from u8 (for atomic storage).
    #[inline]
    pub fn from_u8(val: u8) -> Self {
        match val {
            1 => ExecState::Draining,
            2 => ExecState::Stopped,
            _ => ExecState::Idle,
        }
    }

    /// Convert to u8 (for atomic storage).
    #[inline]
    pub fn as_u8(&self) -> u8 {
        match self {
            ExecState::Idle => 0,
            ExecState::Draining => 1,
            ExecState::Stopped => 2,
        }
    }
}

/// Queue, stop signal and loop state under one roof.
pub(crate) struct CycleExecutor {
    queue: TaskQueue,
    signal: StopSignal,
    state: AtomicU8,
}

impl CycleExecutor {
    pub(crate) fn new() -> Self {
        Self {
            queue: TaskQueue::new(),
            signal: StopSignal::new(),
            state: AtomicU8::new(ExecState::Idle.as_u8()),
        }
    }

    #[inline]
    pub(crate) fn queue(&self) -> &TaskQueue {
        &self.queue
    }

    #[inline]
    pub(crate) fn signal(&self) -> &StopSignal {
        &self.signal
    }

    /// Current loop state.
    #[inline]
    pub(crate) fn state(&self) -> ExecState {
        ExecState::from_u8(self.state.load(Ordering::SeqCst))
    }

    #[inline]
    fn set_state(
        &self,
        state: ExecState,
    ) {
        self.state.store(state.as_u8(), Ordering::SeqCst);
    }

    /// Swap the buffers and drain the batch; returns the batch size.
    fn cycle(&self) -> usize {
        let batch = self.queue.swap();
        if batch > 0 {
            self.set_state(ExecState::Draining);
            trace!(batch, "draining batch");
            self.queue.drain();
        }
        batch
    }

    /// Host the loop on the calling thread until a stop request completes.
    ///
    /// The stop checkpoint sits at the end of each cycle, after the batch has
    /// fully drained. A stop request therefore never overtakes work that was
    /// already submitted: an immediate stop is honored only after one
    /// terminal flush of the pending buffer, and a deferred stop after
    /// cycling all the way to an empty swap. Tasks appended later than the
    /// terminal flush's swap are discarded, never executed.
    pub(crate) fn run(&self) {
        self.signal.bind_loop_thread();
        let _exit = ExitGuard(self);
        debug!("arena loop entered");
        loop {
            let drained = self.cycle();
            match self.signal.state() {
                StopState::Immediate => {
                    self.cycle();
                    break;
                }
                StopState::Deferred => {
                    loop {
                        if self.signal.state() == StopState::Immediate {
                            break;
                        }
                        if self.cycle() == 0 {
                            break;
                        }
                    }
                    break;
                }
                StopState::Running => {
                    if drained == 0 {
                        self.set_state(ExecState::Idle);
                        self.queue.wait_until(|| self.signal.stop_requested());
                    }
                }
            }
        }
        debug!("arena loop exited");
    }

    /// Settle the executor as stopped without the loop ever running.
    ///
    /// Releases every exit-gate waiter. Used when hosting the loop fails, and
    /// by the exit guard at the end of a hosted run.
    pub(crate) fn abandon(&self) {
        self.set_state(ExecState::Stopped);
        self.signal.mark_exited();
    }
}

/// Marks loop exit on drop, so external stoppers are released even when a
/// panicking task unwinds the loop.
struct ExitGuard<'a>(&'a CycleExecutor);

impl Drop for ExitGuard<'_> {
    fn drop(&mut self) {
        self.0.abandon();
    }
}
