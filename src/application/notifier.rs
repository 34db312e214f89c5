//! Transient toast notifications.
//!
//! Toasts live in a fixed container created on first use. Each one fades
//! out after the configured lifetime and is detached once the fade is over.

use crate::application::config::ToastConfig;
use crate::application::ports::{Document, ListenerId, Scheduler};
use crate::domain::event::{DomEvent, ElementId, EventKind, ListenerTarget};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Visual style of a toast, mapped onto `alert-{kind}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    Success,
    Danger,
    Warning,
    #[default]
    Info,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Danger => "danger",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const CONTAINER_STYLE: [(&str, &str); 5] = [
    ("position", "fixed"),
    ("top", "20px"),
    ("right", "20px"),
    ("z-index", "9999"),
    ("max-width", "350px"),
];

/// Shows toasts in the page.
pub struct Notifier {
    doc: Rc<dyn Document>,
    scheduler: Rc<dyn Scheduler>,
    config: ToastConfig,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Notifier {
    pub fn new(doc: Rc<dyn Document>, scheduler: Rc<dyn Scheduler>, config: ToastConfig) -> Self {
        Self {
            doc,
            scheduler,
            config,
        }
    }

    /// Show `message` and schedule its dismissal. Returns the toast element.
    ///
    /// The message is inserted as text.
    pub fn notify(&self, message: &str, kind: ToastKind) -> ElementId {
        let container = self.container();
        let doc = &self.doc;

        let toast = doc.create_element("div");
        doc.set_attribute(
            toast,
            "class",
            &format!("alert alert-{kind} alert-dismissible fade show"),
        );
        doc.set_attribute(toast, "role", "alert");
        doc.set_text(toast, message);

        let close = doc.create_element("button");
        doc.set_attribute(close, "type", "button");
        doc.set_attribute(close, "class", "btn-close");
        doc.set_attribute(close, "data-bs-dismiss", "alert");
        doc.set_attribute(close, "aria-label", &self.config.close_label);
        doc.append_child(toast, close);
        doc.append_child(container, toast);

        // The close listener unregisters itself on click; the fade task
        // drops it when the toast times out.
        let close_listener: Rc<Cell<Option<ListenerId>>> = Rc::new(Cell::new(None));
        let dismiss_doc = Rc::downgrade(&self.doc);
        let own_listener = Rc::clone(&close_listener);
        let id = doc.add_event_listener(
            ListenerTarget::Element(close),
            EventKind::Click,
            Rc::new(move |_: &DomEvent| {
                if let Some(doc) = dismiss_doc.upgrade() {
                    doc.remove_element(toast);
                    if let Some(id) = own_listener.take() {
                        doc.remove_event_listener(id);
                    }
                }
            }),
        );
        close_listener.set(Some(id));

        let fade_doc = Rc::clone(&self.doc);
        let scheduler = Rc::clone(&self.scheduler);
        let fade = self.config.fade();
        self.scheduler.schedule(
            self.config.lifetime(),
            Box::new(move || {
                fade_doc.remove_class(toast, "show");
                scheduler.schedule(
                    fade,
                    Box::new(move || {
                        if let Some(id) = close_listener.take() {
                            fade_doc.remove_event_listener(id);
                        }
                        if fade_doc.is_connected(toast) {
                            fade_doc.remove_element(toast);
                        }
                    }),
                );
            }),
        );

        debug!(kind = kind.as_str(), "toast shown");
        toast
    }

    fn container(&self) -> ElementId {
        if let Some(existing) = self.doc.element_by_id(&self.config.container_id) {
            return existing;
        }
        let container = self.doc.create_element("div");
        self.doc.set_attribute(container, "id", &self.config.container_id);
        for (property, value) in CONTAINER_STYLE {
            self.doc.set_style(container, property, value);
        }
        self.doc.append_child(self.doc.body(), container);
        container
    }
}
