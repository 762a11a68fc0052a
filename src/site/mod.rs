//! Site behaviors bound to the page document

mod nav;
mod observe;
pub mod page;
mod scroll;
mod tracking;
mod util;

pub use nav::{ActiveNavLink, MobileMenu};
pub use observe::{LazyImages, RevealOnScroll};
pub use page::build_page;
pub use scroll::{HeaderShadow, ScrollToTop, SmoothScroll, SHADOW_SCROLLED};
pub use tracking::{AnalyticsSink, PhoneClickTracker, TracingSink};
pub use util::{Debounce, Throttle, RESIZE_DEBOUNCE, SCROLL_THROTTLE};

use crate::contact::ContactFormController;
use crate::dom::{EventBus, EventKind};
use std::sync::Arc;
use std::time::Duration;

/// Options for [`install`]
#[derive(Clone, Default)]
pub struct SiteOptions {
    pub analytics: Option<Arc<dyn AnalyticsSink>>,
    pub success_hide_after: Option<Duration>,
}

/// Register every page behavior on `bus`
pub fn install(bus: &mut EventBus, options: SiteOptions) {
    let mut contact = ContactFormController::new();
    if let Some(hide_after) = options.success_hide_after {
        contact = contact.with_success_hide_after(hide_after);
    }

    bus.subscribe(&[EventKind::Click], MobileMenu::new());
    bus.subscribe(&[EventKind::Scroll], HeaderShadow);
    bus.subscribe(&[EventKind::Click], SmoothScroll);
    bus.subscribe(&[EventKind::Scroll, EventKind::Click], ScrollToTop);
    bus.subscribe(&[EventKind::DomContentLoaded], ActiveNavLink);
    bus.subscribe(
        &[EventKind::DomContentLoaded, EventKind::Scroll, EventKind::Resize],
        LazyImages::new(),
    );
    bus.subscribe(
        &[EventKind::DomContentLoaded, EventKind::Scroll, EventKind::Resize],
        RevealOnScroll::new(),
    );
    bus.subscribe(&[EventKind::Click], PhoneClickTracker::new(options.analytics));
    bus.subscribe(&[EventKind::Submit, EventKind::SubmissionSettled], contact);
    tracing::debug!("Installed {} page listeners", bus.listener_count());
}
