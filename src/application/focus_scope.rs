//! Keyboard focus containment for a container element.

use crate::application::ports::Document;
use crate::domain::event::{DomEvent, ElementId};
use crate::domain::focus::{self, FocusBoundary, TrapDecision, FOCUSABLE_SELECTOR};
use crate::domain::selector::{SelectorError, SelectorList};

/// Computes focus boundaries and applies Tab wrapping through a [`Document`].
#[derive(Debug, Clone)]
pub struct FocusScope {
    focusable: SelectorList,
}

impl FocusScope {
    pub fn new(focusable: SelectorList) -> Self {
        Self { focusable }
    }

    /// Scope using the standard focusable-element selector.
    pub fn standard() -> Result<Self, SelectorError> {
        Ok(Self::new(SelectorList::parse(FOCUSABLE_SELECTOR)?))
    }

    pub fn selector(&self) -> &SelectorList {
        &self.focusable
    }

    /// First and last focusable descendant of `container`, read from the
    /// live tree.
    pub fn compute_boundary(&self, doc: &dyn Document, container: ElementId) -> Option<FocusBoundary> {
        let focusables = doc.query_within(container, &self.focusable);
        FocusBoundary::from_ordered(&focusables)
    }

    /// Wrap focus at the edges of `boundary` for a Tab keydown.
    ///
    /// On a wrap the event's default is prevented and focus moves; anything
    /// else is left to the browser.
    pub fn trap(&self, doc: &dyn Document, boundary: Option<FocusBoundary>, event: &DomEvent) -> TrapDecision {
        let Some(key) = event.key() else {
            return TrapDecision::Allow;
        };
        let decision = focus::trap(boundary, key, event.modifiers().shift, doc.active_element());
        if let TrapDecision::Wrap(target) = decision {
            event.prevent_default();
            doc.focus(target);
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::{Key, ListenerTarget, Modifiers};
    use crate::infrastructure::document::MemoryDocument;

    fn tab(shift: bool) -> DomEvent {
        let modifiers = if shift { Modifiers::shift() } else { Modifiers::none() };
        DomEvent::key_down(ListenerTarget::Document, Key::Tab, modifiers)
    }

    #[test]
    fn test_boundary_skips_unfocusable() {
        let doc = MemoryDocument::new();
        let panel = doc.append(doc.body(), "ul", &[]);
        doc.append(panel, "a", &[]);
        let first = doc.append(panel, "a", &[("href", "/a")]);
        doc.append(panel, "button", &[("disabled", "")]);
        doc.append(panel, "span", &[("tabindex", "-1")]);
        let last = doc.append(panel, "span", &[("tabindex", "0")]);

        let scope = FocusScope::standard().unwrap();
        let boundary = scope.compute_boundary(&doc, panel).unwrap();
        assert_eq!(boundary.first(), first);
        assert_eq!(boundary.last(), last);
    }

    #[test]
    fn test_empty_container_has_no_boundary() {
        let doc = MemoryDocument::new();
        let panel = doc.append(doc.body(), "div", &[]);
        doc.append(panel, "p", &[]);

        let scope = FocusScope::standard().unwrap();
        assert_eq!(scope.compute_boundary(&doc, panel), None);
        assert_eq!(scope.trap(&doc, None, &tab(false)), TrapDecision::Allow);
    }

    #[test]
    fn test_trap_wraps_both_directions() {
        let doc = MemoryDocument::new();
        let panel = doc.append(doc.body(), "ul", &[]);
        let first = doc.append(panel, "a", &[("href", "/1")]);
        doc.append(panel, "a", &[("href", "/2")]);
        let last = doc.append(panel, "a", &[("href", "/3")]);
        let scope = FocusScope::standard().unwrap();
        let boundary = scope.compute_boundary(&doc, panel);

        doc.focus(last);
        let event = tab(false);
        assert_eq!(scope.trap(&doc, boundary, &event), TrapDecision::Wrap(first));
        assert!(event.default_prevented());
        assert_eq!(doc.active_element(), Some(first));

        let event = tab(true);
        assert_eq!(scope.trap(&doc, boundary, &event), TrapDecision::Wrap(last));
        assert_eq!(doc.active_element(), Some(last));
    }

    #[test]
    fn test_single_focusable_keeps_focus() {
        let doc = MemoryDocument::new();
        let panel = doc.append(doc.body(), "div", &[]);
        let only = doc.append(panel, "button", &[]);
        let scope = FocusScope::standard().unwrap();
        let boundary = scope.compute_boundary(&doc, panel);
        doc.focus(only);

        for shift in [false, true] {
            let event = tab(shift);
            assert_eq!(scope.trap(&doc, boundary, &event), TrapDecision::Wrap(only));
            assert!(event.default_prevented());
            assert_eq!(doc.active_element(), Some(only));
        }
    }

    #[test]
    fn test_middle_focus_allows_default() {
        let doc = MemoryDocument::new();
        let panel = doc.append(doc.body(), "div", &[]);
        doc.append(panel, "button", &[]);
        let middle = doc.append(panel, "input", &[]);
        doc.append(panel, "button", &[]);
        let scope = FocusScope::standard().unwrap();
        let boundary = scope.compute_boundary(&doc, panel);
        doc.focus(middle);

        let event = tab(false);
        assert_eq!(scope.trap(&doc, boundary, &event), TrapDecision::Allow);
        assert!(!event.default_prevented());
        assert_eq!(doc.active_element(), Some(middle));
    }
}
