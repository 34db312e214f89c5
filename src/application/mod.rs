//! Application layer - orchestration of domain logic.
//!
//! This layer binds the pure domain decisions to the page:
//! - Feature registry (one-shot initialization)
//! - Debounced and throttled callbacks
//! - Focus containment and the navigation disclosure controller
//! - Toast notifications and the peripheral features
//!
//! ## Ports
//!
//! The application layer defines ports (traits) that infrastructure
//! adapters and host-provided libraries implement. This keeps the
//! application layer independent from any particular DOM or runtime.

pub mod config;
pub mod disclosure;
pub mod features;
pub mod focus_scope;
pub mod metrics;
pub mod notifier;
pub mod ports;
pub mod rate_limiter;
pub mod registry;
