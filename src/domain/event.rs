//! Element handles and DOM events.
//!
//! These are plain data: the `Document` port hands out [`ElementId`]s and the
//! host dispatches [`DomEvent`]s. Default-prevention and propagation flags use
//! interior mutability so that listeners can receive `&DomEvent`.

use std::cell::Cell;
use std::fmt;

/// Opaque handle to an element owned by a `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    /// Raw index of the element inside its document.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    Window,
    Document,
    Element(ElementId),
}

/// Event kinds the enhancement layer listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    Resize,
    Submit,
    Error,
    MouseEnter,
    MouseLeave,
    DomContentLoaded,
}

impl EventKind {
    /// Whether events of this kind travel from the target up to the window.
    pub fn bubbles(self) -> bool {
        matches!(self, EventKind::Click | EventKind::KeyDown | EventKind::Submit)
    }

    /// DOM event type name.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
            EventKind::Resize => "resize",
            EventKind::Submit => "submit",
            EventKind::Error => "error",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::DomContentLoaded => "DOMContentLoaded",
        }
    }
}

/// Keyboard key carried by a `keydown` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Tab,
    Escape,
    Enter,
    Other(String),
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Tab" => Key::Tab,
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            other => Key::Other(other.to_owned()),
        }
    }
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }
}

/// A dispatched DOM event.
#[derive(Debug)]
pub struct DomEvent {
    kind: EventKind,
    target: ListenerTarget,
    key: Option<Key>,
    modifiers: Modifiers,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl DomEvent {
    /// Create an event of `kind` aimed at `target`.
    pub fn new(kind: EventKind, target: ListenerTarget) -> Self {
        Self {
            kind,
            target,
            key: None,
            modifiers: Modifiers::none(),
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    /// A click on `element`.
    pub fn click(element: ElementId) -> Self {
        Self::new(EventKind::Click, ListenerTarget::Element(element))
    }

    /// A key press whose target is `target` (usually the focused element or the document).
    pub fn key_down(target: ListenerTarget, key: Key, modifiers: Modifiers) -> Self {
        Self {
            key: Some(key),
            modifiers,
            ..Self::new(EventKind::KeyDown, target)
        }
    }

    /// A window resize.
    pub fn resize() -> Self {
        Self::new(EventKind::Resize, ListenerTarget::Window)
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn target(&self) -> ListenerTarget {
        self.target
    }

    /// The target element, if the event was aimed at one.
    pub fn target_element(&self) -> Option<ElementId> {
        match self.target {
            ListenerTarget::Element(id) => Some(id),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }
}

/// Smooth or instant scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

/// Loading phase of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Interactive,
    Complete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubbling_kinds() {
        assert!(EventKind::Click.bubbles());
        assert!(EventKind::Submit.bubbles());
        assert!(!EventKind::Resize.bubbles());
        assert!(!EventKind::MouseEnter.bubbles());
        assert!(!EventKind::Error.bubbles());
    }

    #[test]
    fn test_key_from_dom() {
        assert_eq!(Key::from_dom("Tab"), Key::Tab);
        assert_eq!(Key::from_dom("Esc"), Key::Escape);
        assert_eq!(Key::from_dom("a"), Key::Other("a".to_owned()));
    }

    #[test]
    fn test_prevent_default_through_shared_ref() {
        let event = DomEvent::click(ElementId(3));
        let shared = &event;
        shared.prevent_default();
        assert!(event.default_prevented());
        assert!(!event.propagation_stopped());
        assert_eq!(event.target_element(), Some(ElementId(3)));
    }
}
