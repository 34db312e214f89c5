//! Scheduler backed by tokio's local task set.
//!
//! Tasks are `!Send` (they close over `Rc` page state), so they are spawned
//! with `spawn_local` and must run inside a [`tokio::task::LocalSet`].
//! Pair with [`TokioClock`](crate::infrastructure::clock::TokioClock) so
//! throttling follows the same (possibly paused) time.

use crate::application::ports::{Scheduler, Task, TimerId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::AbortHandle;
use tracing::trace;

#[derive(Default)]
struct Timers {
    handles: RefCell<HashMap<u64, AbortHandle>>,
    next_id: Cell<u64>,
}

/// [`Scheduler`] that runs each task on a local tokio task after a sleep.
#[derive(Clone, Default)]
pub struct TokioScheduler {
    timers: Rc<Timers>,
}

impl fmt::Debug for TokioScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokioScheduler")
            .field("pending", &self.pending())
            .finish()
    }
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks spawned but not yet run or cancelled.
    pub fn pending(&self) -> usize {
        self.timers.handles.borrow().len()
    }
}

impl Scheduler for TokioScheduler {
    /// # Panics
    /// Panics if called outside a `LocalSet`, like `spawn_local` itself.
    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let id = self.timers.next_id.get();
        self.timers.next_id.set(id + 1);

        let timers = Rc::downgrade(&self.timers);
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            if let Some(timers) = timers.upgrade() {
                timers.handles.borrow_mut().remove(&id);
            }
            task();
        });
        self.timers.handles.borrow_mut().insert(id, handle.abort_handle());
        trace!(id, delay_ms = delay.as_millis() as u64, "timer spawned");
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) -> bool {
        match self.timers.handles.borrow_mut().remove(&id.0) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}
