//! Typed page events and listener registration

use super::document::Document;
use super::element::ElementId;
use crate::contact::{FormInput, SubmissionReceipt, TransportError};
use uuid::Uuid;

/// Events delivered to page listeners
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The page finished building
    DomContentLoaded,
    /// Pointer or keyboard activation of `target`
    Click { target: ElementId },
    /// A form was submitted
    Submit { form: ElementId },
    /// The scroll offset changed
    Scroll,
    /// The viewport changed size
    Resize,
    /// An asynchronous contact submission resolved
    SubmissionSettled {
        form: ElementId,
        attempt: Uuid,
        outcome: Result<SubmissionReceipt, TransportError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    DomContentLoaded,
    Click,
    Submit,
    Scroll,
    Resize,
    SubmissionSettled,
}

impl PageEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            PageEvent::DomContentLoaded => EventKind::DomContentLoaded,
            PageEvent::Click { .. } => EventKind::Click,
            PageEvent::Submit { .. } => EventKind::Submit,
            PageEvent::Scroll => EventKind::Scroll,
            PageEvent::Resize => EventKind::Resize,
            PageEvent::SubmissionSettled { .. } => EventKind::SubmissionSettled,
        }
    }
}

/// Work a listener asks the host to carry out after dispatch
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send the contact form through the submission transport
    SubmitContact {
        form: ElementId,
        attempt: Uuid,
        input: FormInput,
    },
}

/// Mutable view handed to each listener during dispatch
pub struct EventContext<'a> {
    pub document: &'a mut Document,
    default_prevented: bool,
    effects: Vec<Effect>,
}

impl<'a> EventContext<'a> {
    pub fn new(document: &'a mut Document) -> Self {
        Self {
            document,
            default_prevented: false,
            effects: Vec::new(),
        }
    }

    /// `event.preventDefault()`
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn emit(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    fn into_response(self) -> EventResponse {
        EventResponse {
            default_prevented: self.default_prevented,
            effects: self.effects,
        }
    }
}

/// Outcome of dispatching one event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventResponse {
    pub default_prevented: bool,
    pub effects: Vec<Effect>,
}

/// A small controller reacting to page events
pub trait EventListener {
    /// Name used in logs
    fn name(&self) -> &'static str;

    fn handle(&mut self, event: &PageEvent, cx: &mut EventContext<'_>);
}

struct Registration {
    kinds: Vec<EventKind>,
    listener: Box<dyn EventListener>,
}

/// Listeners registered per event kind, invoked in registration order
#[derive(Default)]
pub struct EventBus {
    registrations: Vec<Registration>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kinds: &[EventKind], listener: impl EventListener + 'static) {
        tracing::debug!("Registering listener {} for {:?}", listener.name(), kinds);
        self.registrations.push(Registration {
            kinds: kinds.to_vec(),
            listener: Box::new(listener),
        });
    }

    pub fn listener_count(&self) -> usize {
        self.registrations.len()
    }

    pub fn dispatch(&mut self, document: &mut Document, event: &PageEvent) -> EventResponse {
        let kind = event.kind();
        let mut cx = EventContext::new(document);
        for registration in &mut self.registrations {
            if registration.kinds.contains(&kind) {
                tracing::trace!("Dispatching {:?} to {}", kind, registration.listener.name());
                registration.listener.handle(event, &mut cx);
            }
        }
        cx.into_response()
    }
}
