//! Navigation disclosure controller.
//!
//! Binds the pure transition table in [`crate::domain::disclosure`] to the
//! page. Every listener funnels into [`DisclosureController::dispatch`]; the
//! state, the open class, `aria-expanded` and the scroll lock change together
//! inside one call, so no other handler can observe a partial update.

use crate::application::config::{self, ConfigError, NavigationConfig};
use crate::application::focus_scope::FocusScope;
use crate::application::metrics::Metrics;
use crate::application::ports::{Document, Listener, ListenerId, Scheduler, TimerId};
use crate::application::rate_limiter::{debounce, Debounced};
use crate::domain::disclosure::{transition, DisclosureEvent, DisclosureState, Effect, Transition};
use crate::domain::event::{DomEvent, ElementId, EventKind, Key, ListenerTarget, Modifiers};
use crate::domain::focus::FocusBoundary;
use crate::domain::selector::SelectorList;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;
use tracing::debug;

/// Delay before focusing into a freshly opened panel. The open transition
/// may still be laying out the panel when the click handler returns.
pub const FOCUS_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Quiet period after the last resize before the width is acted on.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Navigation settings with selectors parsed.
#[derive(Debug, Clone)]
pub struct NavigationSettings {
    root: SelectorList,
    toggle: SelectorList,
    list: SelectorList,
    link: SelectorList,
    scope: FocusScope,
    open_class: String,
    scroll_lock_class: String,
    breakpoint: u32,
    resize_debounce: Duration,
    focus_settle: Duration,
}

impl NavigationSettings {
    pub fn from_config(config: &NavigationConfig) -> Result<Self, ConfigError> {
        if config.breakpoint == 0 {
            return Err(ConfigError::Zero {
                field: "navigation.breakpoint",
            });
        }
        Ok(Self {
            root: config::selector("navigation.root", &config.root)?,
            toggle: config::selector("navigation.toggle", &config.toggle)?,
            list: config::selector("navigation.list", &config.list)?,
            link: config::selector("navigation.link", &config.link)?,
            scope: FocusScope::new(config::selector("navigation.focusable", &config.focusable)?),
            open_class: config.open_class.clone(),
            scroll_lock_class: config.scroll_lock_class.clone(),
            breakpoint: config.breakpoint,
            resize_debounce: config.resize_debounce(),
            focus_settle: config.focus_settle(),
        })
    }

    pub fn breakpoint(&self) -> u32 {
        self.breakpoint
    }
}

/// Elements the controller drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationElements {
    pub root: ElementId,
    pub toggle: ElementId,
    pub list: ElementId,
    pub body: ElementId,
}

/// Owns the open/closed state of the navigation panel.
pub struct DisclosureController {
    doc: Rc<dyn Document>,
    scheduler: Rc<dyn Scheduler>,
    settings: NavigationSettings,
    elements: NavigationElements,
    metrics: Metrics,
    state: Cell<DisclosureState>,
    boundary: Cell<Option<FocusBoundary>>,
    focus_timer: Cell<Option<TimerId>>,
    resize: RefCell<Option<Debounced<u32>>>,
    listeners: RefCell<Vec<ListenerId>>,
    this: Weak<DisclosureController>,
}

impl fmt::Debug for DisclosureController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisclosureController")
            .field("state", &self.state.get())
            .field("elements", &self.elements)
            .field("boundary", &self.boundary.get())
            .finish_non_exhaustive()
    }
}

impl DisclosureController {
    /// Find the navigation elements and wire every listener.
    ///
    /// Returns `None`, having touched nothing, when the root, toggle, or list
    /// is missing.
    pub fn install(
        doc: Rc<dyn Document>,
        scheduler: Rc<dyn Scheduler>,
        settings: NavigationSettings,
        metrics: Metrics,
    ) -> Option<Rc<Self>> {
        let elements = NavigationElements {
            root: doc.query_selector(&settings.root)?,
            toggle: doc.query_selector(&settings.toggle)?,
            list: doc.query_selector(&settings.list)?,
            body: doc.body(),
        };

        let controller = Rc::new_cyclic(|this| Self {
            doc,
            scheduler,
            settings,
            elements,
            metrics,
            state: Cell::new(DisclosureState::Closed),
            boundary: Cell::new(None),
            focus_timer: Cell::new(None),
            resize: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            this: this.clone(),
        });
        controller.sync_closed();
        controller.wire();
        debug!(
            root = %elements.root,
            toggle = %elements.toggle,
            "navigation installed"
        );
        Some(controller)
    }

    /// Feed one event through the state machine and apply its effect.
    pub fn dispatch(&self, event: DisclosureEvent) -> Transition {
        self.dispatch_from(event, None)
    }

    pub fn state(&self) -> DisclosureState {
        self.state.get()
    }

    pub fn is_open(&self) -> bool {
        self.state.get().is_open()
    }

    /// Focus boundary computed at the last open.
    pub fn boundary(&self) -> Option<FocusBoundary> {
        self.boundary.get()
    }

    pub fn elements(&self) -> NavigationElements {
        self.elements
    }

    /// Remove every listener and drop pending timers. The panel is left in
    /// its current state.
    pub fn detach(&self) {
        for id in self.listeners.borrow_mut().drain(..) {
            self.doc.remove_event_listener(id);
        }
        if let Some(resize) = self.resize.borrow_mut().take() {
            resize.cancel();
        }
        if let Some(timer) = self.focus_timer.take() {
            self.scheduler.cancel(timer);
        }
    }

    fn dispatch_from(&self, event: DisclosureEvent, source: Option<&DomEvent>) -> Transition {
        let from = self.state.get();
        let step = transition(from, event, self.settings.breakpoint);
        self.state.set(step.next);
        if step.next != from {
            debug!(?event, from = ?from, to = ?step.next, "navigation transition");
        }
        self.apply(step.effect, from, source);
        step
    }

    fn apply(&self, effect: Effect, from: DisclosureState, source: Option<&DomEvent>) {
        match effect {
            Effect::None => {}
            Effect::Open => self.open(),
            Effect::Close { restore_focus } => {
                self.close();
                if from.is_open() {
                    self.metrics.record_nav_close();
                }
                if restore_focus {
                    self.doc.focus(self.elements.toggle);
                }
            }
            Effect::TrapFocus { shift } => {
                let synthetic;
                let event = match source {
                    Some(event) => event,
                    None => {
                        let modifiers = if shift { Modifiers::shift() } else { Modifiers::none() };
                        synthetic = DomEvent::key_down(ListenerTarget::Document, Key::Tab, modifiers);
                        &synthetic
                    }
                };
                self.settings
                    .scope
                    .trap(&*self.doc, self.boundary.get(), event);
            }
        }
    }

    fn open(&self) {
        let NavigationElements {
            root,
            toggle,
            list,
            body,
        } = self.elements;
        let boundary = self.settings.scope.compute_boundary(&*self.doc, list);
        self.boundary.set(boundary);

        self.doc.add_class(root, &self.settings.open_class);
        self.doc
            .set_attribute(toggle, "aria-expanded", DisclosureState::Open.aria_expanded());
        self.doc.add_class(body, &self.settings.scroll_lock_class);
        self.metrics.record_nav_open();

        if let Some(boundary) = boundary {
            let this = self.this.clone();
            let timer = self.scheduler.schedule(
                self.settings.focus_settle,
                Box::new(move || {
                    let Some(controller) = this.upgrade() else {
                        return;
                    };
                    controller.focus_timer.set(None);
                    if controller.is_open() {
                        controller.doc.focus(boundary.first());
                    }
                }),
            );
            if let Some(stale) = self.focus_timer.replace(Some(timer)) {
                self.scheduler.cancel(stale);
            }
        }
    }

    fn close(&self) {
        if let Some(timer) = self.focus_timer.take() {
            self.scheduler.cancel(timer);
        }
        self.sync_closed();
        self.doc
            .remove_class(self.elements.body, &self.settings.scroll_lock_class);
    }

    fn sync_closed(&self) {
        self.doc
            .remove_class(self.elements.root, &self.settings.open_class);
        self.doc.set_attribute(
            self.elements.toggle,
            "aria-expanded",
            DisclosureState::Closed.aria_expanded(),
        );
    }

    fn wire(&self) {
        let NavigationElements { root, toggle, .. } = self.elements;

        self.listen(
            ListenerTarget::Element(toggle),
            EventKind::Click,
            self.handler(|controller, event| {
                event.prevent_default();
                controller.dispatch_from(DisclosureEvent::TriggerActivated, Some(event));
            }),
        );

        self.listen(
            ListenerTarget::Document,
            EventKind::KeyDown,
            self.handler(|controller, event| match event.key() {
                Some(Key::Escape) => {
                    controller.dispatch_from(DisclosureEvent::EscapePressed, Some(event));
                }
                Some(Key::Tab) => {
                    let shift = event.modifiers().shift;
                    controller.dispatch_from(DisclosureEvent::TabPressed { shift }, Some(event));
                }
                _ => {}
            }),
        );

        self.listen(
            ListenerTarget::Document,
            EventKind::Click,
            self.handler(move |controller, event| {
                let inside = event.target_element().is_some_and(|target| {
                    controller.doc.contains(root, target) || controller.doc.contains(toggle, target)
                });
                if !inside {
                    controller.dispatch_from(DisclosureEvent::OutsideClick, Some(event));
                }
            }),
        );

        for link in self.doc.query_within(root, &self.settings.link) {
            self.listen(
                ListenerTarget::Element(link),
                EventKind::Click,
                self.link_handler(link),
            );
        }

        let this = self.this.clone();
        let settled = debounce(
            move |width: u32| {
                if let Some(controller) = this.upgrade() {
                    controller.dispatch(DisclosureEvent::ViewportSettled { width });
                }
            },
            self.settings.resize_debounce,
            Rc::clone(&self.scheduler),
        );
        *self.resize.borrow_mut() = Some(settled.clone());
        let doc = Rc::downgrade(&self.doc);
        self.listen(
            ListenerTarget::Window,
            EventKind::Resize,
            Rc::new(move |_: &DomEvent| {
                if let Some(doc) = doc.upgrade() {
                    settled.call(doc.viewport_width());
                }
            }),
        );
    }

    /// Handler for one navigation link.
    fn link_handler(&self, link: ElementId) -> Listener {
        self.handler(move |controller, event| {
            debug!(%link, "navigation link activated");
            controller.dispatch_from(DisclosureEvent::LinkActivated, Some(event));
        })
    }

    fn handler<F>(&self, f: F) -> Listener
    where
        F: Fn(&DisclosureController, &DomEvent) + 'static,
    {
        let this = self.this.clone();
        Rc::new(move |event: &DomEvent| {
            if let Some(controller) = this.upgrade() {
                f(&controller, event);
            }
        })
    }

    fn listen(&self, target: ListenerTarget, kind: EventKind, listener: Listener) {
        let id = self.doc.add_event_listener(target, kind, listener);
        self.listeners.borrow_mut().push(id);
    }
}
