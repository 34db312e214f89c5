//! Recording doubles for the third-party collaborator ports.

use crate::application::ports::{
    CollaboratorError, Document, FormTransport, HoverAnimation, HoverAnimator, ScrollReveal,
    ScrollRevealOptions, TransportCallback, TransportError, TransportResponse,
};
use crate::domain::event::ElementId;
use crate::domain::selector::SelectorList;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Scroll-reveal library that records what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingScrollReveal {
    inits: RefCell<Vec<ScrollRevealOptions>>,
    refreshes: Cell<usize>,
    fail_refresh: bool,
}

impl RecordingScrollReveal {
    pub fn new() -> Self {
        Self::default()
    }

    /// A library whose `refresh` always errors.
    pub fn failing() -> Self {
        Self {
            fail_refresh: true,
            ..Self::default()
        }
    }

    pub fn inits(&self) -> Vec<ScrollRevealOptions> {
        self.inits.borrow().clone()
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes.get()
    }
}

impl ScrollReveal for RecordingScrollReveal {
    fn init(&self, options: &ScrollRevealOptions) {
        self.inits.borrow_mut().push(options.clone());
    }

    fn refresh(&self) -> Result<(), CollaboratorError> {
        self.refreshes.set(self.refreshes.get() + 1);
        if self.fail_refresh {
            Err(CollaboratorError("refresh before init".into()))
        } else {
            Ok(())
        }
    }
}

/// Hover animator that records every animation request.
#[derive(Debug, Default)]
pub struct RecordingAnimator {
    calls: RefCell<Vec<HoverAnimation>>,
}

impl RecordingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<HoverAnimation> {
        self.calls.borrow().clone()
    }
}

impl HoverAnimator for RecordingAnimator {
    fn animate(&self, animation: &HoverAnimation) {
        self.calls.borrow_mut().push(animation.clone());
    }
}

/// One request seen by [`RecordingTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub endpoint: String,
    pub body: Value,
    /// Whether the watched button carried `disabled` while the request was
    /// in flight.
    pub button_disabled: Option<bool>,
}

/// Form endpoint that answers with a canned response and records requests.
///
/// Replies are delivered during `post_json` unless [`hold_replies`] was
/// called, in which case completions queue until [`release`].
///
/// [`hold_replies`]: RecordingTransport::hold_replies
/// [`release`]: RecordingTransport::release
pub struct RecordingTransport {
    response: RefCell<Result<TransportResponse, TransportError>>,
    requests: RefCell<Vec<RecordedRequest>>,
    watch: RefCell<Option<(Weak<dyn Document>, SelectorList)>>,
    holding: Cell<bool>,
    held: RefCell<Vec<TransportCallback>>,
}

impl std::fmt::Debug for RecordingTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingTransport")
            .field("response", &self.response.borrow())
            .field("requests", &self.requests.borrow().len())
            .field("held", &self.held.borrow().len())
            .finish()
    }
}

impl RecordingTransport {
    pub fn new(response: Result<TransportResponse, TransportError>) -> Self {
        Self {
            response: RefCell::new(response),
            requests: RefCell::new(Vec::new()),
            watch: RefCell::new(None),
            holding: Cell::new(false),
            held: RefCell::new(Vec::new()),
        }
    }

    /// Endpoint answering `{"success": true}`.
    pub fn accepting() -> Self {
        Self::new(Ok(TransportResponse::new(200, r#"{"success":true}"#)))
    }

    /// Endpoint answering `{"success": false}` with an optional message.
    pub fn rejecting(message: Option<&str>) -> Self {
        let body = match message {
            Some(message) => serde_json::json!({ "success": false, "message": message }),
            None => serde_json::json!({ "success": false }),
        };
        Self::new(Ok(TransportResponse::new(200, body.to_string())))
    }

    /// Endpoint that cannot be reached.
    pub fn unreachable() -> Self {
        Self::new(Err(TransportError::Unreachable("connection refused".into())))
    }

    pub fn respond_with(&self, response: Result<TransportResponse, TransportError>) {
        *self.response.borrow_mut() = response;
    }

    /// Record the disabled state of the first element matching `button`
    /// whenever a request arrives.
    pub fn watch_button(&self, doc: Rc<dyn Document>, button: SelectorList) {
        *self.watch.borrow_mut() = Some((Rc::downgrade(&doc), button));
    }

    /// Keep completions queued instead of answering immediately.
    pub fn hold_replies(&self) {
        self.holding.set(true);
    }

    pub fn pending_replies(&self) -> usize {
        self.held.borrow().len()
    }

    /// Answer every queued request with the canned response. Returns how many
    /// completions ran.
    pub fn release(&self) -> usize {
        let held = std::mem::take(&mut *self.held.borrow_mut());
        let count = held.len();
        for done in held {
            let response = self.response.borrow().clone();
            done(response);
        }
        count
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    fn watched_button(&self) -> Option<(Rc<dyn Document>, ElementId)> {
        let watch = self.watch.borrow();
        let (doc, selector) = watch.as_ref()?;
        let doc = doc.upgrade()?;
        let button = doc.query_selector(selector)?;
        Some((doc, button))
    }
}

impl FormTransport for RecordingTransport {
    fn post_json(&self, endpoint: &str, body: &Value, done: TransportCallback) {
        let button_disabled = self
            .watched_button()
            .map(|(doc, button)| doc.has_attribute(button, "disabled"));
        self.requests.borrow_mut().push(RecordedRequest {
            endpoint: endpoint.to_owned(),
            body: body.clone(),
            button_disabled,
        });
        if self.holding.get() {
            self.held.borrow_mut().push(done);
            return;
        }
        let response = self.response.borrow().clone();
        done(response);
    }
}
