//! Responsive images, lazy loading, and broken-image fallback.

use crate::application::config::{self, ConfigError, ImageConfig};
use crate::application::ports::{Document, Listener};
use crate::domain::event::{DomEvent, ElementId, EventKind, ListenerTarget};
use crate::domain::selector::SelectorList;
use std::rc::{Rc, Weak};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ImageSettings {
    selector: SelectorList,
    fluid_class: String,
    logo_class: String,
    critical_attribute: String,
    placeholder: String,
    logo_max_height: String,
}

impl ImageSettings {
    pub fn from_config(config: &ImageConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            selector: config::selector("images.selector", &config.selector)?,
            fluid_class: config.fluid_class.clone(),
            logo_class: config.logo_class.clone(),
            critical_attribute: config.critical_attribute.clone(),
            placeholder: config.placeholder.clone(),
            logo_max_height: config.logo_max_height.clone(),
        })
    }

    fn is_critical(&self, doc: &dyn Document, image: ElementId) -> bool {
        doc.has_attribute(image, &self.critical_attribute) || doc.has_class(image, &self.logo_class)
    }
}

/// Prepare every image and register its error fallback. Returns how many
/// images were prepared.
pub fn install(doc: &Rc<dyn Document>, settings: ImageSettings) -> usize {
    let settings = Rc::new(settings);
    let images = doc.query_selector_all(&settings.selector);
    for &image in &images {
        doc.add_class(image, &settings.fluid_class);
        if !doc.has_attribute(image, "loading") && !settings.is_critical(&**doc, image) {
            doc.set_attribute(image, "loading", "lazy");
        }
        doc.add_event_listener(
            ListenerTarget::Element(image),
            EventKind::Error,
            fallback_handler(Rc::downgrade(doc), image, Rc::clone(&settings)),
        );
    }
    images.len()
}

/// Swap a broken image for the placeholder.
fn fallback_handler(doc: Weak<dyn Document>, image: ElementId, settings: Rc<ImageSettings>) -> Listener {
    Rc::new(move |_: &DomEvent| {
        let Some(doc) = doc.upgrade() else {
            return;
        };
        if doc.attribute(image, "src").as_deref() == Some(settings.placeholder.as_str()) {
            return;
        }
        debug!(%image, "image failed to load, showing placeholder");
        doc.set_attribute(image, "src", &settings.placeholder);
        doc.set_style(image, "object-fit", "contain");
        if doc.has_class(image, &settings.logo_class) {
            doc.set_style(image, "max-height", &settings.logo_max_height);
        }
    })
}
