//! Hover micro-animations.

use crate::application::config::{self, ConfigError, HoverConfig};
use crate::application::ports::{Document, HoverAnimation, HoverAnimator, Listener};
use crate::domain::event::{DomEvent, ElementId, EventKind, ListenerTarget};
use crate::domain::selector::SelectorList;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HoverSettings {
    selector: SelectorList,
    scale: f64,
    opacity: f64,
    duration: Duration,
    easing: String,
}

impl HoverSettings {
    pub fn from_config(config: &HoverConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            selector: config::selector("hover.selector", &config.selector)?,
            scale: config.scale,
            opacity: config.opacity,
            duration: Duration::from_millis(config.duration_ms),
            easing: config.easing.clone(),
        })
    }

    fn animation(&self, target: ElementId, scale: f64, opacity: f64) -> HoverAnimation {
        HoverAnimation {
            target,
            scale,
            opacity,
            duration: self.duration,
            easing: self.easing.clone(),
        }
    }
}

/// Attach enter/leave animations. Without an animator nothing is attached.
/// Returns how many elements were wired.
pub fn install(doc: &dyn Document, animator: Option<Rc<dyn HoverAnimator>>, settings: &HoverSettings) -> usize {
    let Some(animator) = animator else {
        return 0;
    };
    let elements = doc.query_selector_all(&settings.selector);
    for &element in &elements {
        let enter = settings.animation(element, settings.scale, settings.opacity);
        let leave = settings.animation(element, 1.0, 1.0);
        doc.add_event_listener(
            ListenerTarget::Element(element),
            EventKind::MouseEnter,
            animate_handler(Rc::clone(&animator), enter),
        );
        doc.add_event_listener(
            ListenerTarget::Element(element),
            EventKind::MouseLeave,
            animate_handler(Rc::clone(&animator), leave),
        );
    }
    elements.len()
}

fn animate_handler(animator: Rc<dyn HoverAnimator>, animation: HoverAnimation) -> Listener {
    Rc::new(move |_: &DomEvent| animator.animate(&animation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::document::MemoryDocument;
    use crate::infrastructure::mocks::RecordingAnimator;

    fn settings() -> HoverSettings {
        HoverSettings::from_config(&HoverConfig::default()).unwrap()
    }

    #[test]
    fn test_enter_and_leave() {
        let doc = MemoryDocument::new();
        let card = doc.append(doc.body(), "div", &[("class", "card")]);
        let animator = Rc::new(RecordingAnimator::new());

        assert_eq!(install(&doc, Some(animator.clone()), &settings()), 1);
        doc.fire(EventKind::MouseEnter, card);
        doc.fire(EventKind::MouseLeave, card);

        let calls = animator.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].target, card);
        assert_eq!(calls[0].scale, 1.02);
        assert_eq!(calls[0].opacity, 0.95);
        assert_eq!(calls[0].duration, Duration::from_millis(300));
        assert_eq!(calls[0].easing, "easeOutQuad");
        assert_eq!((calls[1].scale, calls[1].opacity), (1.0, 1.0));
    }

    #[test]
    fn test_element_matching_two_selectors_wired_once() {
        let doc = MemoryDocument::new();
        let card = doc.append(doc.body(), "div", &[("class", "card feature-card")]);
        let animator = Rc::new(RecordingAnimator::new());
        install(&doc, Some(animator.clone()), &settings());

        doc.fire(EventKind::MouseEnter, card);
        assert_eq!(animator.calls().len(), 1);
    }

    #[test]
    fn test_hover_does_not_bubble() {
        let doc = MemoryDocument::new();
        let card = doc.append(doc.body(), "div", &[("class", "card")]);
        let inner = doc.append(card, "span", &[]);
        let animator = Rc::new(RecordingAnimator::new());
        install(&doc, Some(animator.clone()), &settings());

        doc.fire(EventKind::MouseEnter, inner);
        assert!(animator.calls().is_empty());
    }

    #[test]
    fn test_no_animator_no_listeners() {
        let doc = MemoryDocument::new();
        doc.append(doc.body(), "a", &[("class", "btn-primary")]);
        assert_eq!(install(&doc, None, &settings()), 0);
        assert_eq!(doc.listener_count(), 0);
    }
}
