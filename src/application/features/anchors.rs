//! In-page anchor links.
//!
//! Off the homepage, `#section` links are rewritten to `/#section` so they
//! lead back to the homepage section. On the homepage, clicks on them scroll
//! smoothly, leaving room for the fixed header.

use crate::application::config::{self, AnchorConfig, ConfigError};
use crate::application::ports::{Document, ListenerId};
use crate::domain::event::{DomEvent, ElementId, EventKind, ListenerTarget, ScrollBehavior};
use crate::domain::path;
use crate::domain::selector::SelectorList;
use std::rc::Rc;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct AnchorSettings {
    links: SelectorList,
    header: SelectorList,
    fallback_header_height: f64,
}

impl AnchorSettings {
    pub fn from_config(config: &AnchorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            links: config::selector("anchors.links", &config.links)?,
            header: config::selector("anchors.header", &config.header)?,
            fallback_header_height: config.fallback_header_height,
        })
    }
}

/// Rewrite anchors when needed and register the smooth-scroll handler.
pub fn install(doc: &Rc<dyn Document>, settings: AnchorSettings) -> ListenerId {
    let current = doc.location_path();
    if !path::is_homepage(&current) {
        let rewritten = rewrite_for_homepage(&**doc, &settings.links);
        debug!(path = %current, rewritten, "anchors rewritten");
    }

    let weak = Rc::downgrade(doc);
    doc.add_event_listener(
        ListenerTarget::Document,
        EventKind::Click,
        Rc::new(move |event: &DomEvent| {
            if let Some(doc) = weak.upgrade() {
                scroll_to_anchor(&*doc, &settings, event);
            }
        }),
    )
}

fn rewrite_for_homepage(doc: &dyn Document, links: &SelectorList) -> usize {
    let mut rewritten = 0;
    for link in doc.query_selector_all(links) {
        let Some(href) = doc.attribute(link, "href") else {
            continue;
        };
        if let Some(target) = path::homepage_anchor(&href) {
            doc.set_attribute(link, "href", &target);
            rewritten += 1;
        }
    }
    rewritten
}

/// Nearest `<a>` at or above `element`.
fn enclosing_link(doc: &dyn Document, element: ElementId) -> Option<ElementId> {
    let mut current = Some(element);
    while let Some(el) = current {
        if doc.tag_name(el).as_deref() == Some("a") {
            return Some(el);
        }
        current = doc.parent(el);
    }
    None
}

fn scroll_to_anchor(doc: &dyn Document, settings: &AnchorSettings, event: &DomEvent) {
    let Some(link) = event.target_element().and_then(|el| enclosing_link(doc, el)) else {
        return;
    };
    let Some(href) = doc.attribute(link, "href") else {
        return;
    };
    let Some(id) = path::fragment_id(&href) else {
        return;
    };

    event.prevent_default();
    let Some(target) = doc.element_by_id(id) else {
        trace!(id, "anchor target missing");
        return;
    };
    let header_height = doc
        .query_selector(&settings.header)
        .map_or(settings.fallback_header_height, |header| doc.offset_height(header));
    let top = doc.bounding_top(target) + doc.scroll_y() - header_height;
    doc.scroll_to(top, ScrollBehavior::Smooth);
}
