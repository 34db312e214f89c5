//! Scroll-reveal library bootstrap.

use crate::application::config::{self, ConfigError, ScrollRevealConfig};
use crate::application::ports::{Document, ScrollReveal, ScrollRevealOptions};
use crate::domain::selector::SelectorList;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ScrollRevealSettings {
    layout_sensitive: SelectorList,
    once: bool,
    mirror: bool,
    duration: Duration,
    easing: String,
    offset: u32,
}

impl ScrollRevealSettings {
    pub fn from_config(config: &ScrollRevealConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            layout_sensitive: config::selector(
                "scroll_reveal.layout_sensitive",
                &config.layout_sensitive,
            )?,
            once: config.once,
            mirror: config.mirror,
            duration: Duration::from_millis(config.duration_ms),
            easing: config.easing.clone(),
            offset: config.offset,
        })
    }

    /// Library options for `doc`; reduced-motion users get it disabled.
    pub fn options(&self, doc: &dyn Document) -> ScrollRevealOptions {
        ScrollRevealOptions {
            once: self.once,
            mirror: self.mirror,
            duration: self.duration,
            easing: self.easing.clone(),
            offset: self.offset,
            disabled: doc.prefers_reduced_motion(),
        }
    }
}

/// Refresh hook handed to the host. A no-op without the library.
#[derive(Clone, Default)]
pub struct RevealHandle {
    library: Option<Rc<dyn ScrollReveal>>,
}

impl fmt::Debug for RevealHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealHandle")
            .field("loaded", &self.library.is_some())
            .finish()
    }
}

impl RevealHandle {
    /// Ask the library to recompute positions. Returns whether it did.
    pub fn refresh(&self) -> bool {
        let Some(library) = &self.library else {
            return false;
        };
        match library.refresh() {
            Ok(()) => true,
            Err(error) => {
                debug!(%error, "scroll reveal refresh failed");
                false
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.library.is_some()
    }
}

/// Strip animations from layout-sensitive elements and start the library.
pub fn install(
    doc: &dyn Document,
    library: Option<Rc<dyn ScrollReveal>>,
    settings: &ScrollRevealSettings,
) -> RevealHandle {
    let Some(library) = library else {
        debug!("scroll reveal library absent");
        return RevealHandle::default();
    };

    for element in doc.query_selector_all(&settings.layout_sensitive) {
        doc.remove_attribute(element, "data-aos");
    }
    let options = settings.options(doc);
    library.init(&options);
    debug!(disabled = options.disabled, "scroll reveal started");

    RevealHandle {
        library: Some(library),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::document::MemoryDocument;
    use crate::infrastructure::mocks::RecordingScrollReveal;

    fn settings() -> ScrollRevealSettings {
        ScrollRevealSettings::from_config(&ScrollRevealConfig::default()).unwrap()
    }

    #[test]
    fn test_init_with_fixed_options() {
        let doc = MemoryDocument::new();
        let library = Rc::new(RecordingScrollReveal::new());
        let handle = install(&doc, Some(library.clone()), &settings());

        let inits = library.inits();
        assert_eq!(inits.len(), 1);
        assert!(!inits[0].once);
        assert!(!inits[0].mirror);
        assert_eq!(inits[0].duration, Duration::from_millis(600));
        assert_eq!(inits[0].easing, "ease-out");
        assert_eq!(inits[0].offset, 120);
        assert!(!inits[0].disabled);
        assert!(handle.is_loaded());
    }

    #[test]
    fn test_reduced_motion_disables() {
        let doc = MemoryDocument::new();
        doc.set_reduced_motion(true);
        let library = Rc::new(RecordingScrollReveal::new());
        install(&doc, Some(library.clone()), &settings());
        assert!(library.inits()[0].disabled);
    }

    #[test]
    fn test_strips_layout_sensitive_only() {
        let doc = MemoryDocument::new();
        let sensitive = doc.append(
            doc.body(),
            "div",
            &[("data-aos", "fade-up"), ("data-avoid-layout", "true")],
        );
        let regular = doc.append(doc.body(), "div", &[("data-aos", "fade-up")]);

        install(&doc, Some(Rc::new(RecordingScrollReveal::new())), &settings());
        assert!(!doc.has_attribute(sensitive, "data-aos"));
        assert!(doc.has_attribute(regular, "data-aos"));
    }

    #[test]
    fn test_absent_library_leaves_page_alone() {
        let doc = MemoryDocument::new();
        let sensitive = doc.append(
            doc.body(),
            "div",
            &[("data-aos", "fade-up"), ("data-avoid-layout", "true")],
        );
        let handle = install(&doc, None, &settings());
        assert!(doc.has_attribute(sensitive, "data-aos"));
        assert!(!handle.refresh());
    }

    #[test]
    fn test_refresh_swallows_failures() {
        let doc = MemoryDocument::new();
        let library = Rc::new(RecordingScrollReveal::failing());
        let handle = install(&doc, Some(library.clone()), &settings());
        assert!(!handle.refresh());
        assert_eq!(library.refreshes(), 1);
    }
}
