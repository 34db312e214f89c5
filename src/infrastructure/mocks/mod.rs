//! Test doubles.
//!
//! Deterministic time, a capturing tracing layer, and recording stand-ins
//! for the scroll-reveal library, the hover animator, and the form endpoint.

pub mod clock;
pub mod collaborators;
pub mod layer;
pub mod virtual_time;

pub use clock::MockClock;
pub use collaborators::{RecordedRequest, RecordingAnimator, RecordingScrollReveal, RecordingTransport};
pub use layer::{CapturedEvent, MockCaptureLayer};
pub use virtual_time::VirtualTime;
