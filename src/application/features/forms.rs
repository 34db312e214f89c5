//! Contact form submission.
//!
//! Forms are validated in the page, posted as JSON through the
//! [`FormTransport`] port, and answered with a toast once the transport
//! completes. While a request is in flight the submit button is disabled and
//! further submits of the same form are swallowed; both are restored when
//! the completion runs, whatever the outcome.

use crate::application::config::{self, ConfigError, FormConfig};
use crate::application::metrics::Metrics;
use crate::application::notifier::{Notifier, ToastKind};
use crate::application::ports::{Document, FormTransport, Listener, TransportError, TransportResponse};
use crate::domain::event::{DomEvent, ElementId, EventKind, ListenerTarget};
use crate::domain::selector::SelectorList;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct FormSettings {
    selector: SelectorList,
    submit_button: SelectorList,
    fields: SelectorList,
    endpoint: String,
    validated_class: String,
    sending_label: String,
    success_message: String,
    failure_message: String,
    network_message: String,
}

impl FormSettings {
    pub fn from_config(config: &FormConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            selector: config::selector("forms.selector", &config.selector)?,
            submit_button: config::selector("forms.submit_button", &config.submit_button)?,
            fields: config::selector("forms.fields", &config.fields)?,
            endpoint: config.endpoint.clone(),
            validated_class: config.validated_class.clone(),
            sending_label: config.sending_label.clone(),
            success_message: config.success_message.clone(),
            failure_message: config.failure_message.clone(),
            network_message: config.network_message.clone(),
        })
    }
}

/// Body the endpoint answers with.
#[derive(Debug, Deserialize)]
struct Reply {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The endpoint accepted the message.
    Accepted,
    /// The endpoint answered but refused, optionally explaining why.
    Rejected { message: Option<String> },
    /// No usable answer: transport error, non-2xx status, or unreadable body.
    Failed,
}

/// Classify the endpoint's answer.
pub fn interpret(result: Result<TransportResponse, TransportError>) -> SubmissionOutcome {
    let response = match result {
        Ok(response) => response,
        Err(error) => {
            warn!(%error, "form submission failed");
            return SubmissionOutcome::Failed;
        }
    };
    if !response.is_success() {
        warn!(status = response.status, "form endpoint returned an error status");
        return SubmissionOutcome::Failed;
    }
    match serde_json::from_str::<Reply>(&response.body) {
        Ok(Reply { success: true, .. }) => SubmissionOutcome::Accepted,
        Ok(Reply { message, .. }) => SubmissionOutcome::Rejected { message },
        Err(error) => {
            warn!(%error, "form endpoint returned an unreadable body");
            SubmissionOutcome::Failed
        }
    }
}

fn input_type(doc: &dyn Document, control: ElementId) -> String {
    doc.attribute(control, "type")
        .map(|t| t.to_ascii_lowercase())
        .unwrap_or_else(|| "text".to_owned())
}

fn is_checkable(kind: &str) -> bool {
    kind == "checkbox" || kind == "radio"
}

/// Controls that take part in validation and serialization.
fn controls(doc: &dyn Document, form: ElementId, settings: &FormSettings) -> Vec<ElementId> {
    doc.query_within(form, &settings.fields)
        .into_iter()
        .filter(|&c| !doc.has_attribute(c, "disabled"))
        .collect()
}

/// Client-side validity: required controls are filled in and email fields
/// contain an `@`.
pub fn is_valid(doc: &dyn Document, form: ElementId, settings: &FormSettings) -> bool {
    let controls = controls(doc, form, settings);
    controls.iter().all(|&control| {
        let kind = input_type(doc, control);
        let required = doc.has_attribute(control, "required");
        if kind == "radio" {
            let name = doc.attribute(control, "name");
            return !required
                || controls.iter().any(|&other| {
                    input_type(doc, other) == "radio"
                        && doc.attribute(other, "name") == name
                        && doc.has_attribute(other, "checked")
                });
        }
        if kind == "checkbox" {
            return !required || doc.has_attribute(control, "checked");
        }
        let value = doc.value(control);
        if required && value.is_empty() {
            return false;
        }
        kind != "email" || value.is_empty() || value.contains('@')
    })
}

/// Named control values as a JSON object. Later controls with the same name
/// overwrite earlier ones.
pub fn serialize(doc: &dyn Document, form: ElementId, settings: &FormSettings) -> Value {
    let mut fields = Map::new();
    for control in controls(doc, form, settings) {
        let Some(name) = doc.attribute(control, "name").filter(|n| !n.is_empty()) else {
            continue;
        };
        let kind = input_type(doc, control);
        if matches!(kind.as_str(), "submit" | "button" | "reset" | "file" | "image") {
            continue;
        }
        let value = if is_checkable(&kind) {
            if !doc.has_attribute(control, "checked") {
                continue;
            }
            doc.attribute(control, "value").unwrap_or_else(|| "on".to_owned())
        } else {
            doc.value(control)
        };
        fields.insert(name, Value::String(value));
    }
    Value::Object(fields)
}

/// Put text controls back to their default values.
fn reset(doc: &dyn Document, form: ElementId, settings: &FormSettings) {
    for control in doc.query_within(form, &settings.fields) {
        let kind = input_type(doc, control);
        if is_checkable(&kind) {
            continue;
        }
        let default = if doc.tag_name(control).as_deref() == Some("textarea") {
            doc.text(control)
        } else {
            doc.attribute(control, "value").unwrap_or_default()
        };
        doc.set_value(control, &default);
    }
}

struct FormHandler {
    doc: Weak<dyn Document>,
    transport: Rc<dyn FormTransport>,
    notifier: Rc<Notifier>,
    metrics: Metrics,
    settings: Rc<FormSettings>,
    in_flight: RefCell<HashSet<ElementId>>,
    this: Weak<FormHandler>,
}

impl FormHandler {
    /// Validate and post `form`. Returns whether a request was started.
    fn submit(&self, doc: &dyn Document, form: ElementId) -> bool {
        let settings = &*self.settings;
        if self.in_flight.borrow().contains(&form) {
            debug!(%form, "submission already in flight");
            return false;
        }
        if !is_valid(doc, form, settings) {
            doc.add_class(form, &settings.validated_class);
            self.metrics.record_form_blocked();
            debug!(%form, "form blocked by validation");
            return false;
        }

        let button = doc.query_within(form, &settings.submit_button).into_iter().next();
        let restore = button.map(|b| (b, doc.text(b)));
        if let Some(button) = button {
            doc.set_attribute(button, "disabled", "");
            doc.set_text(button, &settings.sending_label);
        }

        let body = serialize(doc, form, settings);
        self.metrics.record_form_submission();
        self.in_flight.borrow_mut().insert(form);

        let handler = self.this.clone();
        self.transport.post_json(
            &settings.endpoint,
            &body,
            Box::new(move |result: Result<TransportResponse, TransportError>| {
                if let Some(handler) = handler.upgrade() {
                    handler.complete(form, restore, interpret(result));
                }
            }),
        );
        true
    }

    /// Settle a submission once the endpoint has answered.
    fn complete(&self, form: ElementId, restore: Option<(ElementId, String)>, outcome: SubmissionOutcome) {
        self.in_flight.borrow_mut().remove(&form);
        let settings = &*self.settings;
        match &outcome {
            SubmissionOutcome::Accepted => {
                self.notifier.notify(&settings.success_message, ToastKind::Success);
            }
            SubmissionOutcome::Rejected { message } => {
                self.metrics.record_form_failure();
                let text = message.as_deref().unwrap_or(&settings.failure_message);
                self.notifier.notify(text, ToastKind::Danger);
            }
            SubmissionOutcome::Failed => {
                self.metrics.record_form_failure();
                self.notifier.notify(&settings.network_message, ToastKind::Danger);
            }
        }

        let Some(doc) = self.doc.upgrade() else {
            return;
        };
        if outcome == SubmissionOutcome::Accepted {
            reset(&*doc, form, settings);
            doc.remove_class(form, &settings.validated_class);
        }
        if let Some((button, label)) = restore {
            doc.remove_attribute(button, "disabled");
            doc.set_text(button, &label);
        }
        debug!(%form, ?outcome, "form submission settled");
    }
}

/// Listener for one form.
fn submit_handler(handler: Rc<FormHandler>, form: ElementId) -> Listener {
    Rc::new(move |event: &DomEvent| {
        event.prevent_default();
        event.stop_propagation();
        if let Some(doc) = handler.doc.upgrade() {
            handler.submit(&*doc, form);
        }
    })
}

/// Intercept submission of every matching form. Without a transport the
/// forms are left to submit natively. Returns how many forms were wired.
pub fn install(
    doc: &Rc<dyn Document>,
    transport: Option<Rc<dyn FormTransport>>,
    notifier: Rc<Notifier>,
    metrics: Metrics,
    settings: FormSettings,
) -> usize {
    let Some(transport) = transport else {
        debug!("no form transport, leaving native submission");
        return 0;
    };
    let forms = doc.query_selector_all(&settings.selector);
    let handler = Rc::new_cyclic(|this: &Weak<FormHandler>| FormHandler {
        doc: Rc::downgrade(doc),
        transport,
        notifier,
        metrics,
        settings: Rc::new(settings),
        in_flight: RefCell::new(HashSet::new()),
        this: this.clone(),
    });
    for &form in &forms {
        doc.add_event_listener(
            ListenerTarget::Element(form),
            EventKind::Submit,
            submit_handler(Rc::clone(&handler), form),
        );
    }
    forms.len()
}
