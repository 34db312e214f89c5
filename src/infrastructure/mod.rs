//! Infrastructure layer - adapters and the public entry point.
//!
//! This layer provides adapters for:
//! - Clock abstraction (system time, tokio time, mock)
//! - Timers (single-threaded event loop, tokio local tasks)
//! - The in-memory DOM
//! - Storage for feature flags (sharded maps)
//! - Logging setup
//!
//! and the [`Enhancer`](enhancer::Enhancer) that wires everything together.

pub mod clock;
pub mod document;
pub mod enhancer;
pub mod event_loop;
pub mod logging;
pub mod storage;

#[cfg(feature = "async")]
pub mod tokio_scheduler;

/// Mock implementations for testing.
///
/// This module is only available when the `test-helpers` feature is enabled,
/// or during test builds. It provides a controllable clock, virtual time,
/// a capturing tracing layer, and recording collaborators.
///
/// To use these mocks in integration tests, add to your `Cargo.toml`:
/// ```toml
/// [dev-dependencies]
/// site-enhance = { version = "*", features = ["test-helpers"] }
/// ```
#[cfg(any(test, feature = "test-helpers"))]
pub mod mocks;
