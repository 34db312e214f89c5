//! Rate limiting policies for high-frequency callbacks.
//!
//! Two policies are provided:
//! - [`ThrottlePolicy`]: leading-edge sampling, at most one call per interval.
//!   Calls inside the cooldown are dropped, never queued.
//! - [`DebounceState`]: trailing-edge coalescing. Every call supersedes the
//!   previous one; only the last arguments survive a quiet period.
//!
//! Both are pure and take timestamps or tickets from the caller, so the
//! timing behavior is testable without a scheduler.

use std::time::{Duration, Instant};

/// Decision made by a rate limiting policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Forward the call to the wrapped callback
    Allow,
    /// Drop the call
    Suppress,
}

impl PolicyDecision {
    /// Check if this decision is Allow.
    pub fn is_allow(&self) -> bool {
        matches!(self, PolicyDecision::Allow)
    }

    /// Check if this decision is Suppress.
    pub fn is_suppress(&self) -> bool {
        matches!(self, PolicyDecision::Suppress)
    }
}

/// Trait for timestamp-driven rate limiting policies.
pub trait RateLimitPolicy {
    /// Register a call made at `timestamp` and decide whether it goes through.
    fn register_event(&mut self, timestamp: Instant) -> PolicyDecision;

    /// Forget all history.
    fn reset(&mut self);
}

/// Leading-edge throttle.
///
/// The first call opens a cooldown window of `limit`; calls inside the
/// window are suppressed; the first call at or after the window's end is
/// allowed and opens a new window.
///
/// # Example
/// ```
/// use site_enhance::domain::rate_limit::{RateLimitPolicy, ThrottlePolicy};
/// use std::time::{Duration, Instant};
///
/// let mut policy = ThrottlePolicy::new(Duration::from_millis(100));
/// let now = Instant::now();
///
/// assert!(policy.register_event(now).is_allow());
/// assert!(policy.register_event(now + Duration::from_millis(50)).is_suppress());
/// assert!(policy.register_event(now + Duration::from_millis(100)).is_allow());
/// ```
#[derive(Debug, Clone)]
pub struct ThrottlePolicy {
    limit: Duration,
    cooldown_until: Option<Instant>,
}

impl ThrottlePolicy {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            cooldown_until: None,
        }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Whether a call at `now` would land inside the cooldown.
    pub fn is_cooling_down(&self, now: Instant) -> bool {
        self.cooldown_until.is_some_and(|until| now < until)
    }
}

impl RateLimitPolicy for ThrottlePolicy {
    fn register_event(&mut self, timestamp: Instant) -> PolicyDecision {
        if self.is_cooling_down(timestamp) {
            return PolicyDecision::Suppress;
        }
        self.cooldown_until = Some(timestamp + self.limit);
        PolicyDecision::Allow
    }

    fn reset(&mut self) {
        self.cooldown_until = None;
    }
}

/// Ticket identifying one debounced call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

/// Trailing-edge debounce bookkeeping.
///
/// [`record`](Self::record) stores the latest arguments and returns a
/// ticket; the caller arms a timer carrying that ticket. When the timer
/// fires, [`settle`](Self::settle) hands back the arguments only if no newer
/// call was recorded in the meantime.
///
/// # Example
/// ```
/// use site_enhance::domain::rate_limit::DebounceState;
///
/// let mut state = DebounceState::new();
/// let first = state.record("a");
/// let second = state.record("b");
///
/// assert_eq!(state.settle(first), None);
/// assert_eq!(state.settle(second), Some("b"));
/// assert_eq!(state.settle(second), None);
/// ```
#[derive(Debug, Clone)]
pub struct DebounceState<A> {
    generation: u64,
    pending: Option<A>,
}

impl<A> DebounceState<A> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            pending: None,
        }
    }

    /// Record a call, superseding any pending one.
    pub fn record(&mut self, args: A) -> Generation {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(args);
        Generation(self.generation)
    }

    /// Claim the pending arguments if `ticket` is still the latest call.
    pub fn settle(&mut self, ticket: Generation) -> Option<A> {
        if ticket.0 != self.generation {
            return None;
        }
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop the pending call, if any.
    pub fn cancel(&mut self) -> Option<A> {
        self.generation = self.generation.wrapping_add(1);
        self.pending.take()
    }
}

impl<A> Default for DebounceState<A> {
    fn default() -> Self {
        Self::new()
    }
}
