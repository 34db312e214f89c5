//! Ports (interfaces) for the application layer.
//!
//! In hexagonal architecture, ports define the interfaces that the application
//! layer needs. Infrastructure adapters implement these ports; the third-party
//! collaborators (scroll reveal, hover animation, form endpoint) are ports the
//! host may or may not provide.

use crate::domain::event::{DomEvent, ElementId, EventKind, ListenerTarget, ReadyState, ScrollBehavior};
use crate::domain::selector::SelectorList;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Port for obtaining current time.
///
/// Infrastructure provides concrete implementations (SystemClock, MockClock).
pub trait Clock: Send + Sync + Debug {
    /// Get the current instant.
    fn now(&self) -> Instant;
}

/// Handle to a scheduled continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) u64);

/// A continuation run by a [`Scheduler`].
pub type Task = Box<dyn FnOnce()>;

/// Port for delayed, single-threaded continuations (`setTimeout`).
pub trait Scheduler {
    /// Run `task` once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: Task) -> TimerId;

    /// Cancel a pending task. Returns `false` if it already ran or was cancelled.
    fn cancel(&self, id: TimerId) -> bool;
}

/// Port for key-value storage.
///
/// Infrastructure provides concrete implementations (ShardedStorage).
pub trait Storage<K, V>: Send + Sync + Debug
where
    K: Hash + Eq + Clone + Send + Sync,
    V: Send + Sync,
{
    /// Access an entry with mutable access, creating it if necessary.
    ///
    /// # Arguments
    /// * `key` - The key to look up
    /// * `factory` - Function to create a new value if the key doesn't exist
    /// * `accessor` - Function that gets mutable access to the value
    ///
    /// # Returns
    /// The result from the accessor function
    fn with_entry_mut<F, R>(&self, key: K, factory: impl FnOnce() -> V, accessor: F) -> R
    where
        F: FnOnce(&mut V) -> R;

    /// Read an existing entry without creating it.
    fn get<R>(&self, key: &K, reader: impl FnOnce(&V) -> R) -> Option<R>;

    /// Get the number of entries in the storage.
    fn len(&self) -> usize;

    /// Check if the storage is empty.
    fn is_empty(&self) -> bool;

    /// Iterate over all entries, providing access to both key and value.
    fn for_each<F>(&self, f: F)
    where
        F: FnMut(&K, &V);
}

/// Event callback registered on a [`Document`].
pub type Listener = Rc<dyn Fn(&DomEvent)>;

/// Handle to a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

/// Port for the page's DOM.
///
/// Methods take `&self`; adapters use interior mutability the way browser DOM
/// handles do. Unknown element ids are treated as detached elements: reads
/// return empty values and writes are ignored.
pub trait Document {
    fn ready_state(&self) -> ReadyState;

    fn body(&self) -> ElementId;

    /// All matching elements in document order.
    fn query_selector_all(&self, selector: &SelectorList) -> Vec<ElementId>;

    /// First matching element in document order.
    fn query_selector(&self, selector: &SelectorList) -> Option<ElementId> {
        self.query_selector_all(selector).into_iter().next()
    }

    /// Matching descendants of `root` (excluding `root`) in document order.
    fn query_within(&self, root: ElementId, selector: &SelectorList) -> Vec<ElementId>;

    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// Lower-case tag name.
    fn tag_name(&self, element: ElementId) -> Option<String>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn has_attribute(&self, element: ElementId, name: &str) -> bool {
        self.attribute(element, name).is_some()
    }

    fn set_attribute(&self, element: ElementId, name: &str, value: &str);

    fn remove_attribute(&self, element: ElementId, name: &str);

    fn has_class(&self, element: ElementId, class: &str) -> bool;

    fn add_class(&self, element: ElementId, class: &str);

    fn remove_class(&self, element: ElementId, class: &str);

    fn classes(&self, element: ElementId) -> Vec<String>;

    fn set_style(&self, element: ElementId, property: &str, value: &str);

    fn style(&self, element: ElementId, property: &str) -> Option<String>;

    fn text(&self, element: ElementId) -> String;

    fn set_text(&self, element: ElementId, text: &str);

    /// Current value of a form control.
    fn value(&self, element: ElementId) -> String;

    fn set_value(&self, element: ElementId, value: &str);

    fn parent(&self, element: ElementId) -> Option<ElementId>;

    fn children(&self, element: ElementId) -> Vec<ElementId>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;

    fn create_element(&self, tag: &str) -> ElementId;

    fn append_child(&self, parent: ElementId, child: ElementId);

    /// Detach `element` from its parent.
    fn remove_element(&self, element: ElementId);

    /// Whether `element` is attached to the document tree.
    fn is_connected(&self, element: ElementId) -> bool;

    fn focus(&self, element: ElementId);

    fn active_element(&self) -> Option<ElementId>;

    /// `window.innerWidth` in CSS pixels.
    fn viewport_width(&self) -> u32;

    /// `window.pageYOffset`.
    fn scroll_y(&self) -> f64;

    fn offset_height(&self, element: ElementId) -> f64;

    /// Top of the element's bounding box relative to the viewport.
    fn bounding_top(&self, element: ElementId) -> f64;

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);

    /// `location.pathname`.
    fn location_path(&self) -> String;

    /// `(prefers-reduced-motion: reduce)`.
    fn prefers_reduced_motion(&self) -> bool;

    fn add_event_listener(&self, target: ListenerTarget, kind: EventKind, listener: Listener) -> ListenerId;

    fn remove_event_listener(&self, id: ListenerId) -> bool;
}

/// Options handed to the scroll-reveal library.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollRevealOptions {
    /// Animate only the first time an element scrolls into view.
    pub once: bool,
    /// Animate again when scrolling back past an element.
    pub mirror: bool,
    pub duration: Duration,
    pub easing: String,
    /// Trigger offset from the viewport edge, in pixels.
    pub offset: u32,
    /// Library disabled entirely (reduced-motion preference).
    pub disabled: bool,
}

/// Error raised by a third-party collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("collaborator failed: {0}")]
pub struct CollaboratorError(pub String);

/// Port for the external scroll-reveal animation library.
pub trait ScrollReveal {
    fn init(&self, options: &ScrollRevealOptions);

    /// Recalculate element positions after layout changes.
    fn refresh(&self) -> Result<(), CollaboratorError>;
}

/// A single hover micro-animation request.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverAnimation {
    pub target: ElementId,
    pub scale: f64,
    pub opacity: f64,
    pub duration: Duration,
    pub easing: String,
}

/// Port for the external hover-animation library.
pub trait HoverAnimator {
    fn animate(&self, animation: &HoverAnimation);
}

/// Raw response from the form endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Error returned when the form endpoint cannot be reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("endpoint unreachable: {0}")]
    Unreachable(String),
    #[error("request timed out")]
    Timeout,
}

/// Completion handed to [`FormTransport::post_json`].
pub type TransportCallback = Box<dyn FnOnce(Result<TransportResponse, TransportError>)>;

/// Port for the same-origin JSON form endpoint.
///
/// Posting never blocks: the transport starts the request and calls `done`
/// exactly once when it settles, from a later turn of the host's event loop.
pub trait FormTransport {
    fn post_json(&self, endpoint: &str, body: &serde_json::Value, done: TransportCallback);
}
