//! Single-threaded timer queue.
//!
//! `EventLoop` is the [`Scheduler`] adapter for hosts that drive the page
//! themselves. Timers run in deadline order, ties broken by scheduling
//! order. A task scheduled while the loop is running that is already due
//! runs in the same pass. Nothing here is `Send`: the page model is one
//! thread with interleaved callbacks.

use crate::application::ports::{Clock, Scheduler, Task, TimerId};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cooperative timer queue driven by a [`Clock`].
pub struct EventLoop {
    clock: Arc<dyn Clock>,
    timers: RefCell<BTreeMap<(Instant, u64), Task>>,
    deadlines: RefCell<HashMap<u64, Instant>>,
    next_id: Cell<u64>,
}

impl fmt::Debug for EventLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLoop")
            .field("clock", &self.clock)
            .field("pending", &self.pending())
            .finish()
    }
}

impl EventLoop {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            timers: RefCell::new(BTreeMap::new()),
            deadlines: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Number of timers that have not run yet.
    pub fn pending(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.borrow().keys().next().map(|(deadline, _)| *deadline)
    }

    /// Run every timer whose deadline has passed. Returns how many ran.
    pub fn run_due(&self) -> usize {
        let mut ran = 0;
        loop {
            let now = self.clock.now();
            let due = {
                let mut timers = self.timers.borrow_mut();
                match timers.first_key_value() {
                    Some((&(deadline, _), _)) if deadline <= now => timers.pop_first(),
                    _ => None,
                }
            };
            let Some(((_, id), task)) = due else {
                break;
            };
            self.deadlines.borrow_mut().remove(&id);
            task();
            ran += 1;
        }
        ran
    }

    /// Block the thread until every pending timer has run.
    ///
    /// Only meaningful with a clock that advances on its own.
    pub fn run_until_idle(&self) {
        while let Some(deadline) = self.next_deadline() {
            let wait = deadline.saturating_duration_since(self.clock.now());
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
            self.run_due();
        }
    }
}

impl Scheduler for EventLoop {
    fn schedule(&self, delay: Duration, task: Task) -> TimerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let deadline = self.clock.now() + delay;
        self.timers.borrow_mut().insert((deadline, id), task);
        self.deadlines.borrow_mut().insert(id, deadline);
        TimerId(id)
    }

    fn cancel(&self, id: TimerId) -> bool {
        let Some(deadline) = self.deadlines.borrow_mut().remove(&id.0) else {
            return false;
        };
        self.timers.borrow_mut().remove(&(deadline, id.0)).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::SystemClock;
    use crate::infrastructure::mocks::MockClock;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let l = Rc::clone(&log);
        let make = move |label: &'static str| -> Task {
            let l = Rc::clone(&l);
            Box::new(move || l.borrow_mut().push(label))
        };
        (log, make)
    }

    #[test]
    fn test_runs_in_deadline_then_insertion_order() {
        let start = Instant::now();
        let clock = MockClock::new(start);
        let event_loop = EventLoop::new(Arc::new(clock.clone()));
        let (log, task) = recorder();

        event_loop.schedule(Duration::from_millis(20), task("late"));
        event_loop.schedule(Duration::from_millis(10), task("first"));
        event_loop.schedule(Duration::from_millis(10), task("second"));

        assert_eq!(event_loop.run_due(), 0);
        clock.advance(Duration::from_millis(10));
        assert_eq!(event_loop.run_due(), 2);
        assert_eq!(*log.borrow(), vec!["first", "second"]);

        clock.advance(Duration::from_millis(10));
        event_loop.run_due();
        assert_eq!(*log.borrow(), vec!["first", "second", "late"]);
        assert_eq!(event_loop.pending(), 0);
    }

    #[test]
    fn test_cancel() {
        let clock = MockClock::new(Instant::now());
        let event_loop = EventLoop::new(Arc::new(clock.clone()));
        let (log, task) = recorder();

        let id = event_loop.schedule(Duration::from_millis(5), task("cancelled"));
        assert!(event_loop.cancel(id));
        assert!(!event_loop.cancel(id));

        clock.advance(Duration::from_millis(5));
        assert_eq!(event_loop.run_due(), 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_due_tasks_scheduled_while_running_run_same_pass() {
        let clock = MockClock::new(Instant::now());
        let event_loop = Rc::new(EventLoop::new(Arc::new(clock.clone())));
        let (log, task) = recorder();
        let inner = task("inner");
        let l = Rc::clone(&log);
        let el = Rc::clone(&event_loop);

        event_loop.schedule(
            Duration::ZERO,
            Box::new(move || {
                l.borrow_mut().push("outer");
                el.schedule(Duration::ZERO, inner);
            }),
        );

        assert_eq!(event_loop.run_due(), 2);
        assert_eq!(*log.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn test_run_until_idle_with_system_clock() {
        let event_loop = EventLoop::new(Arc::new(SystemClock::new()));
        let (log, task) = recorder();

        event_loop.schedule(Duration::from_millis(5), task("done"));
        event_loop.run_until_idle();
        assert_eq!(*log.borrow(), vec!["done"]);
        assert_eq!(event_loop.next_deadline(), None);
    }
}
