//! Phone link click tracking

use crate::dom::{EventContext, EventListener, PageEvent};
use serde::Serialize;
use std::sync::Arc;

const PHONE_LINK_SELECTOR: &str = r#"a[href^="tel:"]"#;

/// One analytics hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsEvent {
    pub action: String,
    pub category: String,
    pub label: String,
    pub value: u32,
}

impl AnalyticsEvent {
    pub fn phone_click() -> Self {
        Self {
            action: "click".to_string(),
            category: "Contact".to_string(),
            label: "Phone Click".to_string(),
            value: 1,
        }
    }
}

/// Destination for analytics hits
#[cfg_attr(test, mockall::automock)]
pub trait AnalyticsSink: Send + Sync {
    fn record(&self, event: &AnalyticsEvent);
}

/// Writes analytics hits to the log
#[derive(Debug, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn record(&self, event: &AnalyticsEvent) {
        match serde_json::to_string(event) {
            Ok(json) => tracing::info!("Analytics event: {}", json),
            Err(e) => tracing::warn!("Failed to serialize analytics event: {}", e),
        }
    }
}

/// Logs clicks on `tel:` links and forwards them to the analytics sink
pub struct PhoneClickTracker {
    sink: Option<Arc<dyn AnalyticsSink>>,
    clicks: u32,
}

impl PhoneClickTracker {
    pub fn new(sink: Option<Arc<dyn AnalyticsSink>>) -> Self {
        Self { sink, clicks: 0 }
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }
}

impl EventListener for PhoneClickTracker {
    fn name(&self) -> &'static str {
        "phone-click-tracker"
    }

    fn handle(&mut self, event: &PageEvent, cx: &mut EventContext<'_>) {
        let PageEvent::Click { target } = event else {
            return;
        };
        if cx.document.closest(*target, PHONE_LINK_SELECTOR).is_none() {
            return;
        }

        self.clicks += 1;
        if let Some(sink) = &self.sink {
            sink.record(&AnalyticsEvent::phone_click());
        }
        tracing::info!("Phone click tracked");
    }
}
