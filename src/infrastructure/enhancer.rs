//! Page enhancer entry point.
//!
//! [`Enhancer`] compiles the configuration once, then wires every feature
//! exactly once when the document becomes interactive. Features are
//! independent: a feature whose elements or collaborator are missing
//! declines without affecting the others.

use crate::application::config::{ConfigError, EnhancerConfig};
use crate::application::disclosure::{DisclosureController, NavigationSettings};
use crate::application::features::anchors::AnchorSettings;
use crate::application::features::forms::FormSettings;
use crate::application::features::hover::HoverSettings;
use crate::application::features::images::ImageSettings;
use crate::application::features::scroll_reveal::{RevealHandle, ScrollRevealSettings};
use crate::application::features::spacing::SpacingSettings;
use crate::application::features::{active_menu, anchors, forms, hover, images, logo, scroll_reveal, spacing};
use crate::application::metrics::Metrics;
use crate::application::notifier::{Notifier, ToastKind};
use crate::application::ports::{
    Clock, Document, FormTransport, HoverAnimator, ListenerId, Scheduler, ScrollReveal,
};
use crate::application::rate_limiter::{debounce, throttle, Debounced, Throttled};
use crate::application::registry::FeatureRegistry;
use crate::domain::event::{DomEvent, ElementId, EventKind, ListenerTarget, ReadyState};
use crate::domain::feature::{Feature, FeatureFlag};
use crate::domain::selector::SelectorList;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::storage::ShardedStorage;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when building an [`Enhancer`].
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("a document is required")]
    MissingDocument,
    #[error("a scheduler is required")]
    MissingScheduler,
}

type FlagStorage = Arc<ShardedStorage<Feature, FeatureFlag>>;

/// Settings for every feature, compiled from [`EnhancerConfig`].
#[derive(Debug, Clone)]
struct CompiledSettings {
    navigation: NavigationSettings,
    scroll_reveal: ScrollRevealSettings,
    anchors: AnchorSettings,
    active_links: SelectorList,
    images: ImageSettings,
    forms: FormSettings,
    hover: HoverSettings,
    spacing: SpacingSettings,
    logo: SelectorList,
    logo_href: String,
}

impl CompiledSettings {
    fn compile(config: &EnhancerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            navigation: NavigationSettings::from_config(&config.navigation)?,
            scroll_reveal: ScrollRevealSettings::from_config(&config.scroll_reveal)?,
            anchors: AnchorSettings::from_config(&config.anchors)?,
            active_links: crate::application::config::selector("navigation.link", &config.navigation.link)?,
            images: ImageSettings::from_config(&config.images)?,
            forms: FormSettings::from_config(&config.forms)?,
            hover: HoverSettings::from_config(&config.hover)?,
            spacing: SpacingSettings::from_config(&config.spacing)?,
            logo: crate::application::config::selector("logo.selector", &config.logo.selector)?,
            logo_href: config.logo.href.clone(),
        })
    }
}

/// Builder for [`Enhancer`].
///
/// The document and scheduler are required. The clock defaults to
/// [`SystemClock`]; collaborators default to absent, which disables the
/// features that depend on them.
#[derive(Default)]
pub struct EnhancerBuilder {
    document: Option<Rc<dyn Document>>,
    scheduler: Option<Rc<dyn Scheduler>>,
    clock: Option<Arc<dyn Clock>>,
    config: EnhancerConfig,
    scroll_reveal: Option<Rc<dyn ScrollReveal>>,
    animator: Option<Rc<dyn HoverAnimator>>,
    transport: Option<Rc<dyn FormTransport>>,
    metrics: Option<Metrics>,
}

impl fmt::Debug for EnhancerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnhancerBuilder")
            .field("document", &self.document.is_some())
            .field("scheduler", &self.scheduler.is_some())
            .field("clock", &self.clock)
            .field("config", &self.config)
            .field("scroll_reveal", &self.scroll_reveal.is_some())
            .field("animator", &self.animator.is_some())
            .field("transport", &self.transport.is_some())
            .finish()
    }
}

impl EnhancerBuilder {
    pub fn with_document(mut self, document: Rc<dyn Document>) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_scheduler(mut self, scheduler: Rc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Set a custom clock (for testing).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_config(mut self, config: EnhancerConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide the scroll-reveal library. Without it scroll reveal is a no-op.
    pub fn with_scroll_reveal(mut self, library: Rc<dyn ScrollReveal>) -> Self {
        self.scroll_reveal = Some(library);
        self
    }

    /// Provide the hover-animation library. Without it hover is a no-op.
    pub fn with_hover_animator(mut self, animator: Rc<dyn HoverAnimator>) -> Self {
        self.animator = Some(animator);
        self
    }

    /// Provide the form endpoint. Without it forms submit natively.
    pub fn with_form_transport(mut self, transport: Rc<dyn FormTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Share a metrics handle with the host.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Build the enhancer.
    ///
    /// # Errors
    /// Returns `BuildError` if the document or scheduler is missing, or the
    /// configuration holds a bad selector or a zero duration/breakpoint.
    pub fn build(self) -> Result<Rc<Enhancer>, BuildError> {
        let doc = self.document.ok_or(BuildError::MissingDocument)?;
        let scheduler = self.scheduler.ok_or(BuildError::MissingScheduler)?;
        let settings = CompiledSettings::compile(&self.config)?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock::new()));
        let notifier = Rc::new(Notifier::new(
            Rc::clone(&doc),
            Rc::clone(&scheduler),
            self.config.toasts.clone(),
        ));

        Ok(Rc::new_cyclic(|this| Enhancer {
            doc,
            scheduler,
            clock,
            settings,
            scroll_reveal: self.scroll_reveal,
            animator: self.animator,
            transport: self.transport,
            metrics: self.metrics.unwrap_or_default(),
            notifier,
            registry: FeatureRegistry::new(Arc::new(ShardedStorage::new())),
            initialized: Cell::new(false),
            ready_listener: Cell::new(None),
            navigation: RefCell::new(None),
            reveal: RefCell::new(RevealHandle::default()),
            this: this.clone(),
        }))
    }
}

/// Progressive-enhancement layer for one page.
///
/// # Examples
///
/// ```
/// use site_enhance::infrastructure::document::MemoryDocument;
/// use site_enhance::infrastructure::enhancer::Enhancer;
/// use site_enhance::infrastructure::mocks::VirtualTime;
/// use std::rc::Rc;
///
/// let doc = Rc::new(MemoryDocument::new());
/// let time = VirtualTime::new();
/// let enhancer = Enhancer::builder()
///     .with_document(doc.clone())
///     .with_scheduler(time.scheduler())
///     .build()
///     .unwrap();
///
/// enhancer.activate();
/// assert!(enhancer.is_initialized());
/// // No navigation markup on this page, so the controller declined.
/// assert!(enhancer.navigation().is_none());
/// ```
pub struct Enhancer {
    doc: Rc<dyn Document>,
    scheduler: Rc<dyn Scheduler>,
    clock: Arc<dyn Clock>,
    settings: CompiledSettings,
    scroll_reveal: Option<Rc<dyn ScrollReveal>>,
    animator: Option<Rc<dyn HoverAnimator>>,
    transport: Option<Rc<dyn FormTransport>>,
    metrics: Metrics,
    notifier: Rc<Notifier>,
    registry: FeatureRegistry<FlagStorage>,
    initialized: Cell<bool>,
    ready_listener: Cell<Option<ListenerId>>,
    navigation: RefCell<Option<Rc<DisclosureController>>>,
    reveal: RefCell<RevealHandle>,
    this: Weak<Enhancer>,
}

impl fmt::Debug for Enhancer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Enhancer")
            .field("initialized", &self.initialized.get())
            .field("features", &self.registry.initialized())
            .field("navigation", &self.navigation.borrow())
            .field("metrics", &self.metrics.snapshot())
            .finish_non_exhaustive()
    }
}

impl Enhancer {
    pub fn builder() -> EnhancerBuilder {
        EnhancerBuilder::default()
    }

    /// Initialize now if the document is past loading, otherwise once
    /// `DOMContentLoaded` fires. Calling it again is a no-op.
    pub fn activate(&self) {
        if self.initialized.get() || self.ready_listener.get().is_some() {
            return;
        }
        if self.doc.ready_state() != ReadyState::Loading {
            self.init();
            return;
        }

        let this = self.this.clone();
        let id = self.doc.add_event_listener(
            ListenerTarget::Document,
            EventKind::DomContentLoaded,
            Rc::new(move |_: &DomEvent| {
                if let Some(enhancer) = this.upgrade() {
                    enhancer.init();
                }
            }),
        );
        self.ready_listener.set(Some(id));
        debug!("waiting for DOMContentLoaded");
    }

    /// Run every feature initializer once, in page order.
    ///
    /// Returns `false` if the enhancer was already initialized.
    pub fn init(&self) -> bool {
        if self.initialized.replace(true) {
            return false;
        }
        if let Some(id) = self.ready_listener.take() {
            self.doc.remove_event_listener(id);
        }

        for feature in Feature::ALL {
            self.registry.run_once(feature, || self.init_feature(feature));
        }
        debug!(features = self.registry.len(), "enhancements applied");
        true
    }

    fn init_feature(&self, feature: Feature) {
        let settings = &self.settings;
        match feature {
            Feature::ScrollReveal => {
                let handle = scroll_reveal::install(&*self.doc, self.scroll_reveal.clone(), &settings.scroll_reveal);
                *self.reveal.borrow_mut() = handle;
            }
            Feature::Navigation => {
                let controller = DisclosureController::install(
                    Rc::clone(&self.doc),
                    Rc::clone(&self.scheduler),
                    settings.navigation.clone(),
                    self.metrics.clone(),
                );
                if controller.is_none() {
                    debug!("navigation markup missing, controller declined");
                }
                *self.navigation.borrow_mut() = controller;
            }
            Feature::Anchors => {
                anchors::install(&self.doc, settings.anchors.clone());
            }
            Feature::ActiveMenu => {
                let marked = active_menu::install(&*self.doc, &settings.active_links);
                debug!(marked, "active menu links");
            }
            Feature::Images => {
                let count = images::install(&self.doc, settings.images.clone());
                debug!(count, "images enhanced");
            }
            Feature::Forms => {
                let count = forms::install(
                    &self.doc,
                    self.transport.clone(),
                    Rc::clone(&self.notifier),
                    self.metrics.clone(),
                    settings.forms.clone(),
                );
                debug!(count, "forms intercepted");
            }
            Feature::HoverAnimation => {
                let count = hover::install(&*self.doc, self.animator.clone(), &settings.hover);
                debug!(count, "hover targets");
            }
            Feature::ResponsiveSpacing => {
                spacing::install(&self.doc, Rc::clone(&self.scheduler), settings.spacing.clone());
            }
            Feature::LogoLink => {
                let linked = logo::install(&*self.doc, &settings.logo, &settings.logo_href);
                debug!(linked, "logo link");
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    /// Whether `feature` has run its initializer.
    pub fn is_feature_initialized(&self, feature: Feature) -> bool {
        self.registry.is_initialized(feature)
    }

    /// Features initialized so far, in initialization order.
    pub fn initialized_features(&self) -> Vec<Feature> {
        self.registry.initialized()
    }

    /// The navigation controller, if the page has navigation markup and the
    /// enhancer has been initialized.
    pub fn navigation(&self) -> Option<Rc<DisclosureController>> {
        self.navigation.borrow().clone()
    }

    /// Ask the scroll-reveal library to recalculate positions. Returns
    /// `false` when the library is absent or the refresh failed.
    pub fn refresh_scroll_reveal(&self) -> bool {
        self.reveal.borrow().refresh()
    }

    /// Show a toast notification.
    pub fn notify(&self, message: &str, kind: ToastKind) -> ElementId {
        self.notifier.notify(message, kind)
    }

    /// Debounce a host callback on this page's scheduler.
    pub fn debounce<A, F>(&self, callback: F, wait: Duration) -> Debounced<A>
    where
        A: 'static,
        F: Fn(A) + 'static,
    {
        debounce(callback, wait, Rc::clone(&self.scheduler))
    }

    /// Throttle a host callback against this page's clock.
    pub fn throttle<A, F>(&self, callback: F, limit: Duration) -> Throttled<A>
    where
        A: 'static,
        F: Fn(A) + 'static,
    {
        throttle(callback, limit, Arc::clone(&self.clock))
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn document(&self) -> &Rc<dyn Document> {
        &self.doc
    }
}
