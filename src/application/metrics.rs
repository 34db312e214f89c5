//! Counters for enhancement activity.
//!
//! Hosts read these to see how visitors use the navigation and how often
//! form submissions reach the endpoint and fail.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared activity counters.
///
/// Cloning is cheap and every clone updates the same counters, so the
/// enhancer and the host can both hold one.
#[derive(Debug, Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    /// Closed → Open transitions of the navigation panel
    nav_opens: AtomicU64,
    /// Open → Closed transitions of the navigation panel
    nav_closes: AtomicU64,
    /// Forms posted to the endpoint
    form_submissions: AtomicU64,
    /// Submissions that produced a failure notification
    form_failures: AtomicU64,
    /// Submissions stopped by client-side validation
    forms_blocked: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner::default()),
        }
    }

    pub(crate) fn record_nav_open(&self) {
        self.inner.nav_opens.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_nav_close(&self) {
        self.inner.nav_closes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_form_submission(&self) {
        self.inner.form_submissions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_form_failure(&self) {
        self.inner.form_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_form_blocked(&self) {
        self.inner.forms_blocked.fetch_add(1, Ordering::Relaxed);
    }

    pub fn nav_opens(&self) -> u64 {
        self.inner.nav_opens.load(Ordering::Relaxed)
    }

    pub fn nav_closes(&self) -> u64 {
        self.inner.nav_closes.load(Ordering::Relaxed)
    }

    pub fn form_submissions(&self) -> u64 {
        self.inner.form_submissions.load(Ordering::Relaxed)
    }

    pub fn form_failures(&self) -> u64 {
        self.inner.form_failures.load(Ordering::Relaxed)
    }

    pub fn forms_blocked(&self) -> u64 {
        self.inner.forms_blocked.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            nav_opens: self.nav_opens(),
            nav_closes: self.nav_closes(),
            form_submissions: self.form_submissions(),
            form_failures: self.form_failures(),
            forms_blocked: self.forms_blocked(),
        }
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        self.inner.nav_opens.store(0, Ordering::Relaxed);
        self.inner.nav_closes.store(0, Ordering::Relaxed);
        self.inner.form_submissions.store(0, Ordering::Relaxed);
        self.inner.form_failures.store(0, Ordering::Relaxed);
        self.inner.forms_blocked.store(0, Ordering::Relaxed);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub nav_opens: u64,
    pub nav_closes: u64,
    pub form_submissions: u64,
    pub form_failures: u64,
    pub forms_blocked: u64,
}

impl MetricsSnapshot {
    /// Share of submissions that failed (0.0 to 1.0).
    ///
    /// Returns 0.0 if nothing was submitted.
    pub fn failure_rate(&self) -> f64 {
        if self.form_submissions == 0 {
            0.0
        } else {
            self.form_failures as f64 / self.form_submissions as f64
        }
    }

    /// Whether the panel is open according to the counters.
    pub fn nav_open(&self) -> bool {
        self.nav_opens > self.nav_closes
    }
}
