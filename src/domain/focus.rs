//! Focus boundaries and the Tab-wrapping decision.
//!
//! A boundary is the first and last keyboard-focusable descendant of a
//! container, in document order. Wrapping only happens at the edges; Tab
//! presses in the middle of the container keep their default behavior.

use crate::domain::event::{ElementId, Key};

/// Elements that take keyboard focus: links with an href, enabled form
/// controls, and anything with a non-negative explicit tab index.
pub const FOCUSABLE_SELECTOR: &str = "a[href], button:not([disabled]), \
     input:not([disabled]), select:not([disabled]), \
     textarea:not([disabled]), [tabindex]:not([tabindex^=\"-\"])";

/// First and last focusable element of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusBoundary {
    first: ElementId,
    last: ElementId,
}

impl FocusBoundary {
    /// Build a boundary from focusable elements in document order.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_ordered(focusables: &[ElementId]) -> Option<Self> {
        Some(Self {
            first: *focusables.first()?,
            last: *focusables.last()?,
        })
    }

    pub fn first(&self) -> ElementId {
        self.first
    }

    pub fn last(&self) -> ElementId {
        self.last
    }

    /// A container with exactly one focusable element.
    pub fn is_single(&self) -> bool {
        self.first == self.last
    }
}

/// Outcome of a keypress inside a focus trap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapDecision {
    /// Let the browser move focus normally.
    Allow,
    /// Prevent the default and move focus to the element.
    Wrap(ElementId),
}

/// Decide whether a keypress must wrap focus around the boundary.
pub fn trap(
    boundary: Option<FocusBoundary>,
    key: &Key,
    shift: bool,
    active: Option<ElementId>,
) -> TrapDecision {
    let Some(boundary) = boundary else {
        return TrapDecision::Allow;
    };
    if *key != Key::Tab {
        return TrapDecision::Allow;
    }
    match (shift, active) {
        (true, Some(el)) if el == boundary.first => TrapDecision::Wrap(boundary.last),
        (false, Some(el)) if el == boundary.last => TrapDecision::Wrap(boundary.first),
        _ => TrapDecision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<ElementId> {
        (0..n).map(ElementId).collect()
    }

    #[test]
    fn test_boundary_from_empty() {
        assert_eq!(FocusBoundary::from_ordered(&[]), None);
    }

    #[test]
    fn test_tab_on_last_wraps_to_first() {
        let items = ids(3);
        let boundary = FocusBoundary::from_ordered(&items);
        assert_eq!(
            trap(boundary, &Key::Tab, false, Some(items[2])),
            TrapDecision::Wrap(items[0])
        );
    }

    #[test]
    fn test_shift_tab_on_first_wraps_to_last() {
        let items = ids(3);
        let boundary = FocusBoundary::from_ordered(&items);
        assert_eq!(
            trap(boundary, &Key::Tab, true, Some(items[0])),
            TrapDecision::Wrap(items[2])
        );
    }

    #[test]
    fn test_middle_element_allows_default() {
        let items = ids(3);
        let boundary = FocusBoundary::from_ordered(&items);
        assert_eq!(trap(boundary, &Key::Tab, false, Some(items[1])), TrapDecision::Allow);
        assert_eq!(trap(boundary, &Key::Tab, true, Some(items[1])), TrapDecision::Allow);
        assert_eq!(trap(boundary, &Key::Tab, true, None), TrapDecision::Allow);
    }

    #[test]
    fn test_single_element_keeps_focus() {
        let items = ids(1);
        let boundary = FocusBoundary::from_ordered(&items);
        assert!(boundary.unwrap().is_single());
        assert_eq!(
            trap(boundary, &Key::Tab, false, Some(items[0])),
            TrapDecision::Wrap(items[0])
        );
        assert_eq!(
            trap(boundary, &Key::Tab, true, Some(items[0])),
            TrapDecision::Wrap(items[0])
        );
    }

    #[test]
    fn test_no_boundary_or_other_key_is_noop() {
        assert_eq!(trap(None, &Key::Tab, false, Some(ElementId(0))), TrapDecision::Allow);
        let items = ids(2);
        let boundary = FocusBoundary::from_ordered(&items);
        assert_eq!(
            trap(boundary, &Key::Enter, false, Some(items[1])),
            TrapDecision::Allow
        );
    }
}
