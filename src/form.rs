//! Contact form: validation and the simulated send.
//!
//! Nothing leaves the page. A valid submission walks the button through a
//! fixed sequence of timed states:
//!
//! ```text
//!          submit (valid)            send_delay_ms           restore_delay_ms
//!   Idle ─────────────────▶ Submitting ─────────────▶ Sent ────────────────▶ Idle
//!    │ ▲                    "Sending..."            "Message Sent!"          original label
//!    │ │ invalid            disabled                form reset               enabled
//!    └─┘ inline errors
//! ```
//!
//! A submit that arrives while the form is not [`FormPhase::Idle`] is
//! dropped. The form owns its single pending timer; [`ContactForm::wake`]
//! claims it when it fires.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ContactConfig;
use crate::platform::{Dom, Handle, Platform, Wake};

pub const FORM_ID: &str = "contact-form";
pub const FORM_CONTROL: &str = "form-control";
pub const ERROR_CLASS: &str = "error";
pub const ERROR_MESSAGE: &str = "error-message";
pub const FOCUSED_CLASS: &str = "focused";
const SUBMIT_BUTTON: &str = r#"button[type="submit"]"#;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// `local@domain.tld` with no whitespace and exactly the one `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

// =============================================================================
// Validation
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Message];

    /// Selector for the field's control within the form.
    pub fn selector(self) -> &'static str {
        match self {
            Field::Name => r#"input[type="text"]"#,
            Field::Email => r#"input[type="email"]"#,
            Field::Message => "textarea",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Name is required")]
    NameMissing,
    #[error("Email is required")]
    EmailMissing,
    #[error("Please enter a valid email address")]
    EmailInvalid,
    #[error("Message is required")]
    MessageMissing,
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            FieldError::NameMissing => Field::Name,
            FieldError::EmailMissing | FieldError::EmailInvalid => Field::Email,
            FieldError::MessageMissing => Field::Message,
        }
    }
}

/// Trimmed field values read at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl Submission {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            message: message.trim().to_string(),
        }
    }

    /// Check every field, collecting all failures in field order.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.name.is_empty() {
            errors.push(FieldError::NameMissing);
        }
        if self.email.is_empty() {
            errors.push(FieldError::EmailMissing);
        } else if !is_valid_email(&self.email) {
            errors.push(FieldError::EmailInvalid);
        }
        if self.message.is_empty() {
            errors.push(FieldError::MessageMissing);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

// =============================================================================
// Phase machine
// =============================================================================

/// Where the simulated send is. Timestamps are scheduler milliseconds.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting {
        since: f64,
        original_label: String,
        timer: Handle,
    },
    Sent {
        since: f64,
        original_label: String,
        timer: Handle,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot {action} while {phase}")]
pub struct PhaseError {
    pub action: &'static str,
    pub phase: &'static str,
}

impl FormPhase {
    pub fn name(&self) -> &'static str {
        match self {
            FormPhase::Idle => "idle",
            FormPhase::Submitting { .. } => "submitting",
            FormPhase::Sent { .. } => "sent",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, FormPhase::Idle)
    }

    /// The timer this phase is waiting on, if any.
    pub fn timer(&self) -> Option<Handle> {
        match self {
            FormPhase::Idle => None,
            FormPhase::Submitting { timer, .. } | FormPhase::Sent { timer, .. } => Some(*timer),
        }
    }

    fn invalid(&self, action: &'static str) -> PhaseError {
        PhaseError {
            action,
            phase: self.name(),
        }
    }

    /// Idle → Submitting.
    pub fn begin(&self, now: f64, original_label: String, timer: Handle) -> Result<FormPhase, PhaseError> {
        match self {
            FormPhase::Idle => Ok(FormPhase::Submitting {
                since: now,
                original_label,
                timer,
            }),
            _ => Err(self.invalid("begin sending")),
        }
    }

    /// Submitting → Sent.
    pub fn complete(&self, now: f64, timer: Handle) -> Result<FormPhase, PhaseError> {
        match self {
            FormPhase::Submitting { original_label, .. } => Ok(FormPhase::Sent {
                since: now,
                original_label: original_label.clone(),
                timer,
            }),
            _ => Err(self.invalid("complete")),
        }
    }

    /// Sent → Idle, handing back the label to restore.
    pub fn restore(&self) -> Result<(FormPhase, String), PhaseError> {
        match self {
            FormPhase::Sent { original_label, .. } => Ok((FormPhase::Idle, original_label.clone())),
            _ => Err(self.invalid("restore")),
        }
    }
}

// =============================================================================
// DOM side
// =============================================================================

/// What a submit attempt did.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitResult {
    /// The form was busy or incomplete; nothing changed.
    Ignored,
    Invalid(Vec<FieldError>),
    Sending,
}

/// A fired form timer that moved the phase forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStep {
    Sent,
    Restored,
}

pub struct ContactForm<E> {
    form: E,
    config: ContactConfig,
    phase: FormPhase,
}

impl<E: Clone + PartialEq> ContactForm<E> {
    /// Attach to `#contact-form`, if the page has one.
    pub fn find<D: Dom<Element = E>>(dom: &D, config: ContactConfig) -> Option<Self> {
        let form = dom.element_by_id(FORM_ID)?;
        Some(Self {
            form,
            config,
            phase: FormPhase::Idle,
        })
    }

    pub fn element(&self) -> &E {
        &self.form
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// Whether `target` is this form or lives inside it.
    pub fn owns<D: Dom<Element = E>>(&self, dom: &D, target: &E) -> bool {
        dom.contains(&self.form, target)
    }

    pub fn submit<P: Platform<Element = E>>(&mut self, platform: &mut P) -> SubmitResult {
        if !self.phase.is_idle() {
            debug!(phase = self.phase.name(), "submit ignored");
            return SubmitResult::Ignored;
        }
        let Some(controls) = self.controls(platform) else {
            warn!("contact form is missing a field; submit ignored");
            return SubmitResult::Ignored;
        };

        let [name, email, message] = &controls;
        let submission = Submission::new(
            &platform.value(name),
            &platform.value(email),
            &platform.value(message),
        );

        clear_form_errors(platform);
        if let Err(errors) = submission.validate() {
            for error in &errors {
                let index = Field::ALL
                    .iter()
                    .position(|f| *f == error.field())
                    .unwrap_or_default();
                show_field_error(platform, &controls[index], &error.to_string());
            }
            debug!(count = errors.len(), "contact form invalid");
            return SubmitResult::Invalid(errors);
        }

        let button = platform.query_within(&self.form, SUBMIT_BUTTON);
        let original_label = button.as_ref().map(|b| platform.text(b)).unwrap_or_default();
        if let Some(button) = &button {
            platform.set_disabled(button, true);
            platform.set_text(button, &self.config.sending_label);
            platform.set_style(button, "opacity", "0.7");
            platform.set_style(button, "cursor", "not-allowed");
        }

        let timer = platform.schedule(Wake::After(f64::from(self.config.send_delay_ms)));
        let now = platform.now();
        match self.phase.begin(now, original_label, timer) {
            Ok(next) => self.phase = next,
            Err(err) => warn!(%err, "contact form"),
        }
        debug!(at = now, "contact form sending");
        SubmitResult::Sending
    }

    /// Deliver a fired timer. Returns `None` when `handle` is not the form's.
    pub fn wake<P: Platform<Element = E>>(&mut self, platform: &mut P, handle: Handle) -> Option<FormStep> {
        if self.phase.timer() != Some(handle) {
            return None;
        }
        let button = platform.query_within(&self.form, SUBMIT_BUTTON);

        if matches!(self.phase, FormPhase::Submitting { .. }) {
            let timer = platform.schedule(Wake::After(f64::from(self.config.restore_delay_ms)));
            match self.phase.complete(platform.now(), timer) {
                Ok(next) => self.phase = next,
                Err(err) => {
                    warn!(%err, "contact form");
                    return None;
                }
            }
            if let Some(button) = &button {
                platform.set_text(button, &self.config.sent_label);
                platform.set_style(button, "background", &self.config.sent_background);
            }
            platform.reset_form(&self.form);
            return Some(FormStep::Sent);
        }

        let (next, label) = match self.phase.restore() {
            Ok(restored) => restored,
            Err(err) => {
                warn!(%err, "contact form");
                return None;
            }
        };
        self.phase = next;
        if let Some(button) = &button {
            platform.set_text(button, &label);
            platform.set_disabled(button, false);
            platform.set_style(button, "opacity", "1");
            platform.set_style(button, "cursor", "pointer");
            platform.set_style(button, "background", &self.config.restored_background);
        }
        Some(FormStep::Restored)
    }

    /// A control in the form gained focus.
    pub fn focus<D: Dom<Element = E>>(&self, dom: &mut D, target: &E) {
        if !self.is_control(dom, target) {
            return;
        }
        if let Some(parent) = dom.parent(target) {
            dom.add_class(&parent, FOCUSED_CLASS);
        }
        clear_field_error(dom, target);
    }

    /// A control lost focus; an empty one drops the focused styling.
    pub fn blur<D: Dom<Element = E>>(&self, dom: &mut D, target: &E) {
        if !self.is_control(dom, target) || !dom.value(target).trim().is_empty() {
            return;
        }
        if let Some(parent) = dom.parent(target) {
            dom.remove_class(&parent, FOCUSED_CLASS);
        }
    }

    /// The user typed into a control.
    pub fn input<D: Dom<Element = E>>(&self, dom: &mut D, target: &E) {
        if self.is_control(dom, target) {
            clear_field_error(dom, target);
        }
    }

    fn is_control<D: Dom<Element = E>>(&self, dom: &D, target: &E) -> bool {
        dom.has_class(target, FORM_CONTROL) && self.owns(dom, target)
    }

    fn controls<D: Dom<Element = E>>(&self, dom: &D) -> Option<[E; 3]> {
        let [name, email, message] = Field::ALL.map(|f| dom.query_within(&self.form, f.selector()));
        Some([name?, email?, message?])
    }
}

/// Mark `field` invalid and put `message` under it, replacing any earlier one.
pub fn show_field_error<D: Dom>(dom: &mut D, field: &D::Element, message: &str) {
    dom.add_class(field, ERROR_CLASS);
    let Some(parent) = dom.parent(field) else {
        return;
    };
    if let Some(existing) = dom.query_within(&parent, &format!(".{ERROR_MESSAGE}")) {
        dom.remove(&existing);
    }
    let note = dom.create_element("div");
    dom.set_class_name(&note, ERROR_MESSAGE);
    dom.set_text(&note, message);
    dom.set_style(&note, "color", "#ef4444");
    dom.set_style(&note, "font-size", "0.875rem");
    dom.set_style(&note, "margin-top", "0.25rem");
    dom.append_child(&parent, &note);
}

pub fn clear_field_error<D: Dom>(dom: &mut D, field: &D::Element) {
    dom.remove_class(field, ERROR_CLASS);
    let note = dom
        .parent(field)
        .and_then(|parent| dom.query_within(&parent, &format!(".{ERROR_MESSAGE}")));
    if let Some(note) = note {
        dom.remove(&note);
    }
}

/// Clear every inline error on the page.
pub fn clear_form_errors<D: Dom>(dom: &mut D) {
    for field in dom.query_all(&format!(".{FORM_CONTROL}.{ERROR_CLASS}")) {
        dom.remove_class(&field, ERROR_CLASS);
    }
    for note in dom.query_all(&format!(".{ERROR_MESSAGE}")) {
        dom.remove(&note);
    }
}
