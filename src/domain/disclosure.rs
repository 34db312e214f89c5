//! Navigation disclosure state machine.
//!
//! The transition table is pure: given the current [`DisclosureState`] and a
//! [`DisclosureEvent`], [`transition`] returns the next state and the single
//! [`Effect`] the controller must apply to the document. Guards live here so
//! they can be tested without a DOM.

/// Whether the navigation panel is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisclosureState {
    #[default]
    Closed,
    Open,
}

impl DisclosureState {
    pub fn is_open(self) -> bool {
        self == DisclosureState::Open
    }

    /// Value mirrored into `aria-expanded`.
    pub fn aria_expanded(self) -> &'static str {
        match self {
            DisclosureState::Open => "true",
            DisclosureState::Closed => "false",
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisclosureEvent {
    /// The toggle control was activated.
    TriggerActivated,
    /// Escape was pressed anywhere in the document.
    EscapePressed,
    /// Tab was pressed; `shift` selects the direction.
    TabPressed { shift: bool },
    /// A click landed outside both the panel and the trigger.
    OutsideClick,
    /// A navigation link inside the panel was activated.
    LinkActivated,
    /// The viewport width settled after a resize burst.
    ViewportSettled { width: u32 },
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to do.
    None,
    /// Recompute the focus boundary, mirror the open state, lock scrolling,
    /// and schedule focus of the first focusable element.
    Open,
    /// Mirror the closed state and unlock scrolling; optionally hand focus
    /// back to the trigger.
    Close { restore_focus: bool },
    /// Contain Tab navigation inside the panel.
    TrapFocus { shift: bool },
}

/// Result of feeding one event to the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: DisclosureState,
    pub effect: Effect,
}

impl Transition {
    fn stay(state: DisclosureState) -> Self {
        Self {
            next: state,
            effect: Effect::None,
        }
    }

    fn close(restore_focus: bool) -> Self {
        Self {
            next: DisclosureState::Closed,
            effect: Effect::Close { restore_focus },
        }
    }
}

/// Apply the transition table.
///
/// `breakpoint` is the viewport width at and above which an open panel is
/// force-closed.
pub fn transition(state: DisclosureState, event: DisclosureEvent, breakpoint: u32) -> Transition {
    use DisclosureEvent as E;
    use DisclosureState as S;

    match (state, event) {
        (S::Closed, E::TriggerActivated) => Transition {
            next: S::Open,
            effect: Effect::Open,
        },
        (S::Open, E::TriggerActivated) => Transition::close(false),
        (S::Open, E::EscapePressed) => Transition::close(true),
        (S::Open, E::TabPressed { shift }) => Transition {
            next: S::Open,
            effect: Effect::TrapFocus { shift },
        },
        (S::Open, E::OutsideClick) => Transition::close(false),
        // Link activation always closes, even from Closed.
        (_, E::LinkActivated) => Transition::close(false),
        (S::Open, E::ViewportSettled { width }) if width >= breakpoint => Transition::close(false),
        (state, _) => Transition::stay(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BP: u32 = 1024;

    #[test]
    fn test_toggle_opens_and_closes() {
        let t = transition(DisclosureState::Closed, DisclosureEvent::TriggerActivated, BP);
        assert_eq!(t.next, DisclosureState::Open);
        assert_eq!(t.effect, Effect::Open);

        let t = transition(t.next, DisclosureEvent::TriggerActivated, BP);
        assert_eq!(t.next, DisclosureState::Closed);
        assert_eq!(t.effect, Effect::Close { restore_focus: false });
    }

    #[test]
    fn test_escape_restores_focus_only_when_open() {
        let t = transition(DisclosureState::Open, DisclosureEvent::EscapePressed, BP);
        assert_eq!(t.effect, Effect::Close { restore_focus: true });

        let t = transition(DisclosureState::Closed, DisclosureEvent::EscapePressed, BP);
        assert_eq!(t, Transition::stay(DisclosureState::Closed));
    }

    #[test]
    fn test_tab_traps_only_when_open() {
        let t = transition(DisclosureState::Open, DisclosureEvent::TabPressed { shift: true }, BP);
        assert_eq!(t.next, DisclosureState::Open);
        assert_eq!(t.effect, Effect::TrapFocus { shift: true });

        let t = transition(DisclosureState::Closed, DisclosureEvent::TabPressed { shift: false }, BP);
        assert_eq!(t.effect, Effect::None);
    }

    #[test]
    fn test_outside_click_guarded_by_open() {
        let t = transition(DisclosureState::Closed, DisclosureEvent::OutsideClick, BP);
        assert_eq!(t.effect, Effect::None);
        let t = transition(DisclosureState::Open, DisclosureEvent::OutsideClick, BP);
        assert_eq!(t.next, DisclosureState::Closed);
    }

    #[test]
    fn test_link_always_closes() {
        for state in [DisclosureState::Open, DisclosureState::Closed] {
            let t = transition(state, DisclosureEvent::LinkActivated, BP);
            assert_eq!(t.next, DisclosureState::Closed);
            assert_eq!(t.effect, Effect::Close { restore_focus: false });
        }
    }

    #[test]
    fn test_viewport_breakpoint() {
        let narrow = DisclosureEvent::ViewportSettled { width: BP - 1 };
        let wide = DisclosureEvent::ViewportSettled { width: BP };
        assert_eq!(transition(DisclosureState::Open, narrow, BP).next, DisclosureState::Open);
        assert_eq!(transition(DisclosureState::Open, wide, BP).next, DisclosureState::Closed);
        assert_eq!(transition(DisclosureState::Closed, wide, BP).effect, Effect::None);
    }

    #[test]
    fn test_aria_expanded_mirror() {
        assert_eq!(DisclosureState::Open.aria_expanded(), "true");
        assert_eq!(DisclosureState::Closed.aria_expanded(), "false");
        assert!(!DisclosureState::default().is_open());
    }
}
