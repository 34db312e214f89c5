//! Mock clock paired with an event loop.

use crate::application::ports::Clock;
use crate::infrastructure::event_loop::EventLoop;
use crate::infrastructure::mocks::MockClock;
use std::rc::Rc;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Deterministic time for tests: a [`MockClock`] and the [`EventLoop`] it drives.
///
/// [`advance`](Self::advance) steps the clock timer by timer, so every task
/// observes the clock at its own deadline rather than at the end of the jump.
///
/// ```
/// use site_enhance::application::ports::Scheduler;
/// use site_enhance::infrastructure::mocks::VirtualTime;
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let time = VirtualTime::new();
/// let fired = Rc::new(Cell::new(false));
/// let f = Rc::clone(&fired);
/// time.scheduler().schedule(Duration::from_millis(100), Box::new(move || f.set(true)));
///
/// time.advance(Duration::from_millis(99));
/// assert!(!fired.get());
/// time.advance(Duration::from_millis(1));
/// assert!(fired.get());
/// ```
#[derive(Debug, Clone)]
pub struct VirtualTime {
    clock: MockClock,
    event_loop: Rc<EventLoop>,
}

impl VirtualTime {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        let clock = MockClock::new(start);
        let event_loop = Rc::new(EventLoop::new(Arc::new(clock.clone())));
        Self { clock, event_loop }
    }

    pub fn clock(&self) -> &MockClock {
        &self.clock
    }

    /// The event loop as a shareable scheduler.
    pub fn scheduler(&self) -> Rc<EventLoop> {
        Rc::clone(&self.event_loop)
    }

    /// Move time forward by `duration`, running timers as their deadlines pass.
    pub fn advance(&self, duration: Duration) {
        let target = self.clock.now() + duration;
        while let Some(deadline) = self.event_loop.next_deadline() {
            if deadline > target {
                break;
            }
            if deadline > self.clock.now() {
                self.clock.set(deadline);
            }
            self.event_loop.run_due();
        }
        self.clock.set(target);
        self.event_loop.run_due();
    }

    /// Run anything already due without moving time.
    pub fn run_due(&self) -> usize {
        self.event_loop.run_due()
    }

    pub fn pending(&self) -> usize {
        self.event_loop.pending()
    }
}

impl Default for VirtualTime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::Scheduler;
    use std::cell::RefCell;

    #[test]
    fn test_tasks_observe_their_own_deadline() {
        let time = VirtualTime::new();
        let start = time.clock().now();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for ms in [30u64, 10, 20] {
            let seen = Rc::clone(&seen);
            let clock = time.clock().clone();
            time.scheduler().schedule(
                Duration::from_millis(ms),
                Box::new(move || seen.borrow_mut().push(clock.now() - start)),
            );
        }

        time.advance(Duration::from_millis(100));
        assert_eq!(
            *seen.borrow(),
            vec![
                Duration::from_millis(10),
                Duration::from_millis(20),
                Duration::from_millis(30)
            ]
        );
        assert_eq!(time.clock().elapsed(), Duration::from_millis(100));
    }

    #[test]
    fn test_chained_timers_within_window_run() {
        let time = VirtualTime::new();
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let scheduler = time.scheduler();
        let inner_scheduler = time.scheduler();

        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                *c.borrow_mut() += 1;
                let c = Rc::clone(&c);
                inner_scheduler.schedule(Duration::from_millis(10), Box::new(move || *c.borrow_mut() += 1));
            }),
        );

        time.advance(Duration::from_millis(15));
        assert_eq!(*count.borrow(), 1);
        time.advance(Duration::from_millis(5));
        assert_eq!(*count.borrow(), 2);
        assert_eq!(time.pending(), 0);
    }
}
