//! Form status message rendering

use crate::dom::{Document, ElementId, ScrollBehavior, TimerAction, TimerId};
use std::time::Duration;

/// Shown after a successful submission
pub const SUCCESS_MESSAGE: &str =
    "Takk for din henvendelse! Jeg vil kontakte deg så snart som mulig, vanligvis innen én arbeidsdag. Har du en akutt lekkasje? Ring meg direkte!";

/// Shown when the transport fails
pub const FAILURE_MESSAGE: &str =
    "Beklager, noe gikk galt. Vennligst prøv igjen eller ring meg direkte.";

/// How long a success message stays visible
pub const SUCCESS_HIDE_AFTER: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    pub fn class(&self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }
}

/// Show `message` in the form message element.
///
/// Sets the text and the `form-message <kind>` class list, makes the element
/// visible and scrolls it to the middle of the viewport. Success messages
/// hide themselves after `hide_after`; the returned timer is that hide.
pub fn show_form_message(
    document: &mut Document,
    element: Option<ElementId>,
    message: &str,
    kind: MessageKind,
    hide_after: Duration,
) -> Option<TimerId> {
    let element = element?;

    let el = document.element_mut(element);
    el.text = message.to_string();
    el.set_class_name(&format!("form-message {}", kind.class()));
    el.set_style("display", "block");

    document.scroll_into_view_centered(element, ScrollBehavior::Smooth);

    match kind {
        MessageKind::Success => {
            Some(document.set_timeout(hide_after, TimerAction::HideElement(element)))
        }
        MessageKind::Error => None,
    }
}
