//! # site-enhance
//!
//! Progressive-enhancement behaviors for a static site, driven through a
//! DOM port so they run against any host document.
//!
//! The core is the navigation disclosure (the "burger menu"): an explicit
//! state machine with keyboard focus containment, Escape and outside-click
//! dismissal, and a debounced close when the viewport widens past the
//! desktop breakpoint. Around it sit the debounce/throttle utilities and a
//! set of independent one-shot features: anchor scrolling, active-link
//! highlighting, image fallbacks, form submission with toast feedback,
//! hover animation, responsive spacing, and the logo link.
//!
//! Every feature is optional. Missing markup or a missing third-party
//! library makes a feature decline silently; the page stays usable with
//! zero enhancements applied.
//!
//! ## Quick Start
//!
//! ```rust
//! use site_enhance::{Document, Enhancer, EventLoop, MemoryDocument, SystemClock};
//! use std::rc::Rc;
//! use std::sync::Arc;
//!
//! let doc = Rc::new(MemoryDocument::new());
//! let body = doc.body();
//! let nav = doc.append(body, "nav", &[("class", "c-nav"), ("id", "main-nav")]);
//! let toggle = doc.append(nav, "button", &[("class", "c-nav__toggle")]);
//! let list = doc.append(nav, "ul", &[("class", "c-nav__list")]);
//! doc.append(list, "a", &[("class", "c-nav__link"), ("href", "/about")]);
//!
//! let event_loop = Rc::new(EventLoop::new(Arc::new(SystemClock::new())));
//! let enhancer = Enhancer::builder()
//!     .with_document(doc.clone())
//!     .with_scheduler(event_loop.clone())
//!     .build()
//!     .unwrap();
//! enhancer.activate();
//!
//! doc.click(toggle);
//! assert!(enhancer.navigation().unwrap().is_open());
//! ```
//!
//! ## Timing
//!
//! All timers go through the [`Scheduler`] port. [`EventLoop`] is a
//! single-threaded timer queue the host drives; with the `async` feature,
//! `TokioScheduler` runs timers as local tokio tasks. Tests use
//! `VirtualTime` (feature `test-helpers`) to step a mock clock timer by
//! timer.
//!
//! ## Configuration
//!
//! [`EnhancerConfig`] carries every selector, class name, breakpoint, and
//! delay. All fields default to the site's conventions, and the whole
//! document can be read from JSON:
//!
//! ```rust
//! use site_enhance::EnhancerConfig;
//!
//! let config = EnhancerConfig::from_json(r#"{"navigation": {"breakpoint": 992}}"#).unwrap();
//! assert_eq!(config.navigation.breakpoint, 992);
//! assert_eq!(config.navigation.open_class, "is-open");
//! ```
//!
//! ## Logging
//!
//! The crate logs through `tracing`: feature initialization and state
//! transitions at `debug`, rate-limiter decisions at `trace`, and form
//! transport failures at `warn`. [`logging::init`](infrastructure::logging::init)
//! installs a fmt subscriber for hosts that have none.

// Domain layer - pure business logic
pub mod domain;

// Application layer - orchestration
pub mod application;

// Infrastructure layer - external adapters
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::{
    disclosure::{DisclosureEvent, DisclosureState, Effect, Transition},
    event::{DomEvent, ElementId, EventKind, Key, ListenerTarget, Modifiers, ReadyState, ScrollBehavior},
    feature::{Feature, FeatureFlag},
    focus::{FocusBoundary, TrapDecision},
    rate_limit::{PolicyDecision, RateLimitPolicy, ThrottlePolicy},
    selector::{SelectorError, SelectorList},
};

pub use application::{
    config::{ConfigError, EnhancerConfig},
    disclosure::{DisclosureController, NavigationSettings},
    focus_scope::FocusScope,
    metrics::{Metrics, MetricsSnapshot},
    notifier::{Notifier, ToastKind},
    ports::{
        Clock, CollaboratorError, Document, FormTransport, HoverAnimation, HoverAnimator, Scheduler,
        ScrollReveal, ScrollRevealOptions, Storage, TransportCallback, TransportError,
        TransportResponse,
    },
    rate_limiter::{debounce, throttle, Debounced, Throttled},
    registry::FeatureRegistry,
};

pub use infrastructure::{
    clock::SystemClock,
    document::MemoryDocument,
    enhancer::{BuildError, Enhancer, EnhancerBuilder},
    event_loop::EventLoop,
    logging::LoggingError,
    storage::ShardedStorage,
};

#[cfg(feature = "async")]
pub use infrastructure::{clock::TokioClock, tokio_scheduler::TokioScheduler};
