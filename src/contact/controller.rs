//! Contact form submission controller

use super::input::FormInput;
use super::message::{
    show_form_message, MessageKind, FAILURE_MESSAGE, SUCCESS_HIDE_AFTER, SUCCESS_MESSAGE,
};
use super::transport::{SubmissionReceipt, SubmissionTransport, TransportError};
use super::validation::{validate, ValidationError};
use crate::dom::{Document, Effect, ElementId, EventContext, EventListener, PageEvent, TimerId};
use std::time::Duration;
use uuid::Uuid;

pub const CONTACT_FORM_ID: &str = "contact-form";
pub const FORM_MESSAGE_ID: &str = "form-message";
const SUBMIT_BUTTON_SELECTOR: &str = ".form-submit .btn";

/// Submit button label at rest
pub const SUBMIT_LABEL: &str = "Send Henvendelse";
/// Submit button label while a submission is in flight
pub const LOADING_LABEL: &str = "⟳ Sender...";

/// Lifecycle of one submission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Pending,
    Succeeded,
    Failed,
}

/// Result of the synchronous first half of a submission
#[derive(Debug, Clone, PartialEq)]
pub enum BeginOutcome {
    /// Valid input; the button is in its pending state and `input` should be sent
    Send { attempt: Uuid, input: FormInput },
    /// Validation failed; the error message is shown
    Rejected(ValidationError),
    /// A submission is already in flight
    Busy,
}

/// Final result of a submission attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Sent(SubmissionReceipt),
    Rejected(ValidationError),
    Failed(TransportError),
    Busy,
    /// The settlement belonged to an attempt this controller no longer tracks
    Stale,
}

/// Owns the submission state of the contact form
#[derive(Debug)]
pub struct ContactFormController {
    state: SubmissionState,
    attempt: Option<Uuid>,
    success_hide_after: Duration,
    /// Pending auto-hide of the last success message
    hide_timer: Option<TimerId>,
}

impl Default for ContactFormController {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactFormController {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
            attempt: None,
            success_hide_after: SUCCESS_HIDE_AFTER,
            hide_timer: None,
        }
    }

    pub fn with_success_hide_after(mut self, hide_after: Duration) -> Self {
        self.success_hide_after = hide_after;
        self
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == SubmissionState::Pending
    }

    fn transition(&mut self, next: SubmissionState) {
        tracing::debug!("Contact form {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Replace the form message, dropping any hide scheduled for the previous one
    fn show_message(&mut self, document: &mut Document, text: &str, kind: MessageKind) {
        if let Some(timer) = self.hide_timer.take() {
            document.clear_timeout(timer);
        }
        let message = document.get_element_by_id(FORM_MESSAGE_ID);
        self.hide_timer =
            show_form_message(document, message, text, kind, self.success_hide_after);
    }

    /// Extract, validate and enter the pending state
    pub fn begin(&mut self, document: &mut Document, form: ElementId) -> BeginOutcome {
        if self.is_pending() {
            tracing::debug!("Ignoring submit while a submission is pending");
            return BeginOutcome::Busy;
        }

        self.transition(SubmissionState::Validating);
        let input = FormInput::from_form(document, form);

        if let Err(error) = validate(&input) {
            tracing::info!("Contact form rejected: {error:?}");
            self.show_message(document, &error.to_string(), MessageKind::Error);
            self.transition(SubmissionState::Idle);
            return BeginOutcome::Rejected(error);
        }

        if let Some(button) = document.query_selector_in(form, SUBMIT_BUTTON_SELECTOR) {
            let el = document.element_mut(button);
            el.add_class("loading");
            el.set_attribute("disabled", "");
            el.text = LOADING_LABEL.to_string();
        }

        let attempt = Uuid::new_v4();
        self.attempt = Some(attempt);
        self.transition(SubmissionState::Pending);
        tracing::info!(%attempt, project_type = %input.project_type, "Submitting contact form");

        BeginOutcome::Send { attempt, input }
    }

    /// Show the outcome of `attempt` and restore the submit button
    pub fn finish(
        &mut self,
        document: &mut Document,
        form: ElementId,
        attempt: Uuid,
        outcome: Result<SubmissionReceipt, TransportError>,
    ) -> SubmitOutcome {
        if self.attempt != Some(attempt) {
            tracing::warn!(%attempt, "Dropping settlement for unknown submission");
            return SubmitOutcome::Stale;
        }
        self.attempt = None;

        let result = match outcome {
            Ok(receipt) => {
                tracing::info!(%attempt, "Contact form delivered");
                self.show_message(document, SUCCESS_MESSAGE, MessageKind::Success);
                document.reset_form(form);
                self.transition(SubmissionState::Succeeded);
                SubmitOutcome::Sent(receipt)
            }
            Err(error) => {
                tracing::warn!(%attempt, "Contact form delivery failed: {error}");
                self.show_message(document, FAILURE_MESSAGE, MessageKind::Error);
                self.transition(SubmissionState::Failed);
                SubmitOutcome::Failed(error)
            }
        };

        if let Some(button) = document.query_selector_in(form, SUBMIT_BUTTON_SELECTOR) {
            let el = document.element_mut(button);
            el.remove_class("loading");
            el.remove_attribute("disabled");
            el.text = SUBMIT_LABEL.to_string();
        }
        self.transition(SubmissionState::Idle);

        result
    }

    /// Run a whole submission, awaiting `transport` in between
    pub async fn submit<T>(
        &mut self,
        document: &mut Document,
        form: ElementId,
        transport: &T,
    ) -> SubmitOutcome
    where
        T: SubmissionTransport + ?Sized,
    {
        match self.begin(document, form) {
            BeginOutcome::Send { attempt, input } => {
                let outcome = transport.submit(&input).await;
                self.finish(document, form, attempt, outcome)
            }
            BeginOutcome::Rejected(error) => SubmitOutcome::Rejected(error),
            BeginOutcome::Busy => SubmitOutcome::Busy,
        }
    }
}

fn is_contact_form(document: &Document, form: ElementId) -> bool {
    document.element(form).id.as_deref() == Some(CONTACT_FORM_ID)
}

impl EventListener for ContactFormController {
    fn name(&self) -> &'static str {
        "contact-form"
    }

    fn handle(&mut self, event: &PageEvent, cx: &mut EventContext<'_>) {
        match event {
            PageEvent::Submit { form } if is_contact_form(cx.document, *form) => {
                cx.prevent_default();
                if let BeginOutcome::Send { attempt, input } = self.begin(cx.document, *form) {
                    cx.emit(Effect::SubmitContact {
                        form: *form,
                        attempt,
                        input,
                    });
                }
            }
            PageEvent::SubmissionSettled {
                form,
                attempt,
                outcome,
            } if is_contact_form(cx.document, *form) => {
                self.finish(cx.document, *form, *attempt, outcome.clone());
            }
            _ => {}
        }
    }
}
