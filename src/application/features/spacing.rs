//! Mobile gap classes for flex containers.
//!
//! Below the breakpoint, flex containers without their own gap utility get
//! one. Containers are marked when the gap is added here, and only marked
//! containers lose it again when the viewport widens.

use crate::application::config::{self, ConfigError, SpacingConfig};
use crate::application::ports::{Document, ListenerId, Scheduler};
use crate::application::rate_limiter::debounce;
use crate::domain::event::{DomEvent, ElementId, EventKind, ListenerTarget};
use crate::domain::selector::SelectorList;
use std::rc::Rc;
use std::time::Duration;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct SpacingSettings {
    selector: SelectorList,
    breakpoint: u32,
    gap_class: String,
    marker_attribute: String,
    resize_debounce: Duration,
}

impl SpacingSettings {
    pub fn from_config(config: &SpacingConfig) -> Result<Self, ConfigError> {
        if config.breakpoint == 0 {
            return Err(ConfigError::Zero {
                field: "spacing.breakpoint",
            });
        }
        Ok(Self {
            selector: config::selector("spacing.selector", &config.selector)?,
            breakpoint: config.breakpoint,
            gap_class: config.gap_class.clone(),
            marker_attribute: config.marker_attribute.clone(),
            resize_debounce: config.resize_debounce(),
        })
    }

    fn is_marked(&self, doc: &dyn Document, container: ElementId) -> bool {
        doc.attribute(container, &self.marker_attribute).as_deref() == Some("true")
    }
}

fn has_gap_utility(doc: &dyn Document, container: ElementId) -> bool {
    doc.classes(container)
        .iter()
        .any(|class| class.starts_with("gap-") || class.starts_with("g-"))
}

/// Add or revert gaps for the current viewport width. Returns how many
/// containers changed.
pub fn apply_gaps(doc: &dyn Document, settings: &SpacingSettings) -> usize {
    let mobile = doc.viewport_width() < settings.breakpoint;
    let mut changed = 0;
    for container in doc.query_selector_all(&settings.selector) {
        let marked = settings.is_marked(doc, container);
        if mobile {
            if marked || has_gap_utility(doc, container) || doc.children(container).len() <= 1 {
                continue;
            }
            doc.add_class(container, &settings.gap_class);
            doc.set_attribute(container, &settings.marker_attribute, "true");
            changed += 1;
        } else if marked {
            doc.remove_class(container, &settings.gap_class);
            doc.remove_attribute(container, &settings.marker_attribute);
            changed += 1;
        }
    }
    trace!(mobile, changed, "flex gaps applied");
    changed
}

/// Apply gaps now and again after each burst of resizes.
pub fn install(doc: &Rc<dyn Document>, scheduler: Rc<dyn Scheduler>, settings: SpacingSettings) -> ListenerId {
    apply_gaps(&**doc, &settings);

    let wait = settings.resize_debounce;
    let weak = Rc::downgrade(doc);
    let settled = debounce(
        move |()| {
            if let Some(doc) = weak.upgrade() {
                apply_gaps(&*doc, &settings);
            }
        },
        wait,
        scheduler,
    );
    doc.add_event_listener(
        ListenerTarget::Window,
        EventKind::Resize,
        Rc::new(move |_: &DomEvent| settled.call(())),
    )
}
