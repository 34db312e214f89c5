//! Debounced and throttled callback wrappers.
//!
//! The wrappers bind the pure policies in [`crate::domain::rate_limit`] to a
//! [`Scheduler`] (debounce) or a [`Clock`] (throttle). Both are cheap to
//! clone; clones share state, so a wrapper can be captured by several
//! listeners and still count as one rate-limited function.

use crate::application::ports::{Clock, Scheduler, TimerId};
use crate::domain::rate_limit::{DebounceState, PolicyDecision, RateLimitPolicy, ThrottlePolicy};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Wrap `callback` so it runs once `wait` has passed without another call.
pub fn debounce<A, F>(callback: F, wait: Duration, scheduler: Rc<dyn Scheduler>) -> Debounced<A>
where
    A: 'static,
    F: Fn(A) + 'static,
{
    Debounced::new(callback, wait, scheduler)
}

/// Wrap `callback` so it runs at most once per `limit`, on the leading edge.
pub fn throttle<A, F>(callback: F, limit: Duration, clock: Arc<dyn Clock>) -> Throttled<A>
where
    F: Fn(A) + 'static,
{
    Throttled::new(callback, limit, clock)
}

/// Trailing-edge debounced callback.
pub struct Debounced<A> {
    inner: Rc<DebounceInner<A>>,
}

struct DebounceInner<A> {
    callback: Box<dyn Fn(A)>,
    wait: Duration,
    scheduler: Rc<dyn Scheduler>,
    state: RefCell<DebounceState<A>>,
    timer: Cell<Option<TimerId>>,
}

impl<A: 'static> Debounced<A> {
    pub fn new<F>(callback: F, wait: Duration, scheduler: Rc<dyn Scheduler>) -> Self
    where
        F: Fn(A) + 'static,
    {
        Self {
            inner: Rc::new(DebounceInner {
                callback: Box::new(callback),
                wait,
                scheduler,
                state: RefCell::new(DebounceState::new()),
                timer: Cell::new(None),
            }),
        }
    }

    /// Record a call. The previous pending call, if any, is discarded.
    pub fn call(&self, args: A) {
        let ticket = self.inner.state.borrow_mut().record(args);
        if let Some(previous) = self.inner.timer.take() {
            self.inner.scheduler.cancel(previous);
            trace!(wait_ms = self.inner.wait.as_millis() as u64, "debounce timer reset");
        }

        let inner = Rc::clone(&self.inner);
        let id = self.inner.scheduler.schedule(
            self.inner.wait,
            Box::new(move || {
                // Bind first so the state borrow ends before the callback runs.
                let settled = inner.state.borrow_mut().settle(ticket);
                if let Some(args) = settled {
                    inner.timer.set(None);
                    (inner.callback)(args);
                }
            }),
        );
        self.inner.timer.set(Some(id));
    }

    /// Drop the pending call without running it.
    pub fn cancel(&self) -> bool {
        let had_pending = self.inner.state.borrow_mut().cancel().is_some();
        if let Some(id) = self.inner.timer.take() {
            self.inner.scheduler.cancel(id);
        }
        had_pending
    }

    pub fn is_pending(&self) -> bool {
        self.inner.state.borrow().is_pending()
    }

    pub fn wait(&self) -> Duration {
        self.inner.wait
    }
}

impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Debounced<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("wait", &self.inner.wait)
            .field("timer", &self.inner.timer.get())
            .finish_non_exhaustive()
    }
}

/// Leading-edge throttled callback.
pub struct Throttled<A> {
    inner: Rc<ThrottleInner<A>>,
}

struct ThrottleInner<A> {
    callback: Box<dyn Fn(A)>,
    clock: Arc<dyn Clock>,
    policy: RefCell<ThrottlePolicy>,
}

impl<A> Throttled<A> {
    pub fn new<F>(callback: F, limit: Duration, clock: Arc<dyn Clock>) -> Self
    where
        F: Fn(A) + 'static,
    {
        Self {
            inner: Rc::new(ThrottleInner {
                callback: Box::new(callback),
                clock,
                policy: RefCell::new(ThrottlePolicy::new(limit)),
            }),
        }
    }

    /// Run the callback now unless a cooldown is active. Dropped calls are
    /// not queued.
    pub fn call(&self, args: A) -> PolicyDecision {
        let now = self.inner.clock.now();
        let decision = self.inner.policy.borrow_mut().register_event(now);
        match decision {
            PolicyDecision::Allow => (self.inner.callback)(args),
            PolicyDecision::Suppress => trace!("throttled call dropped"),
        }
        decision
    }

    pub fn limit(&self) -> Duration {
        self.inner.policy.borrow().limit()
    }

    /// Clear the cooldown so the next call goes through.
    pub fn reset(&self) {
        self.inner.policy.borrow_mut().reset();
    }
}

impl<A> Clone for Throttled<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Throttled<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttled")
            .field("policy", &self.inner.policy.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::mocks::VirtualTime;

    fn collector<A: 'static>() -> (Rc<RefCell<Vec<A>>>, impl Fn(A) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        (seen, move |args: A| s.borrow_mut().push(args))
    }

    #[test]
    fn test_debounce_forwards_last_args_after_quiet_period() {
        let time = VirtualTime::new();
        let (seen, callback) = collector();
        let debounced = debounce(callback, Duration::from_millis(150), time.scheduler());

        debounced.call(1);
        time.advance(Duration::from_millis(100));
        debounced.call(2);
        time.advance(Duration::from_millis(100));
        debounced.call(3);

        assert!(debounced.is_pending());
        time.advance(Duration::from_millis(149));
        assert!(seen.borrow().is_empty());

        time.advance(Duration::from_millis(1));
        assert_eq!(*seen.borrow(), vec![3]);
        assert!(!debounced.is_pending());
        assert_eq!(time.pending(), 0);
    }

    #[test]
    fn test_debounce_runs_once_per_quiet_period() {
        let time = VirtualTime::new();
        let (seen, callback) = collector();
        let debounced = debounce(callback, Duration::from_millis(50), time.scheduler());

        debounced.call("a");
        time.advance(Duration::from_millis(60));
        debounced.call("b");
        time.advance(Duration::from_millis(60));

        assert_eq!(*seen.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_debounce_cancel() {
        let time = VirtualTime::new();
        let (seen, callback) = collector::<u8>();
        let debounced = debounce(callback, Duration::from_millis(50), time.scheduler());

        debounced.call(1);
        assert!(debounced.cancel());
        assert!(!debounced.cancel());
        time.advance(Duration::from_millis(100));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_debounce_clones_share_state() {
        let time = VirtualTime::new();
        let (seen, callback) = collector();
        let debounced = debounce(callback, Duration::from_millis(50), time.scheduler());
        let clone = debounced.clone();

        debounced.call(1);
        clone.call(2);
        time.advance(Duration::from_millis(50));
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn test_throttle_leading_edge_and_drop() {
        let time = VirtualTime::new();
        let (seen, callback) = collector();
        let clock: Arc<dyn Clock> = Arc::new(time.clock().clone());
        let throttled = throttle(callback, Duration::from_millis(100), clock);

        assert!(throttled.call(1).is_allow());
        time.advance(Duration::from_millis(40));
        assert!(throttled.call(2).is_suppress());
        time.advance(Duration::from_millis(60));
        assert!(throttled.call(3).is_allow());

        assert_eq!(*seen.borrow(), vec![1, 3]);
        assert_eq!(throttled.limit(), Duration::from_millis(100));
    }

    #[test]
    fn test_throttle_reset() {
        let time = VirtualTime::new();
        let (seen, callback) = collector();
        let clock: Arc<dyn Clock> = Arc::new(time.clock().clone());
        let throttled = throttle(callback, Duration::from_secs(1), clock);

        throttled.call(1);
        throttled.reset();
        throttled.call(2);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }
}
