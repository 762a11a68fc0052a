//! Contact form: input capture, validation, delivery and feedback

mod controller;
mod email_api;
mod input;
mod message;
mod transport;
mod validation;

pub use controller::{
    BeginOutcome, ContactFormController, SubmissionState, SubmitOutcome, CONTACT_FORM_ID,
    FORM_MESSAGE_ID, LOADING_LABEL, SUBMIT_LABEL,
};
pub use email_api::{EmailApiSettings, EmailApiTransport};
pub use input::FormInput;
pub use message::{
    show_form_message, MessageKind, FAILURE_MESSAGE, SUCCESS_HIDE_AFTER, SUCCESS_MESSAGE,
};
pub use transport::{SimulatedTransport, SubmissionReceipt, SubmissionTransport, TransportError};
pub use validation::{is_valid_email, validate, ValidationError};

#[cfg(test)]
pub use transport::MockSubmissionTransport;
