//! Scroll-driven behaviors: header shadow, in-page anchors, back-to-top

use crate::dom::{Document, EventContext, EventListener, PageEvent, ScrollBehavior};

pub const HEADER_SHADOW_THRESHOLD: f64 = 50.0;
pub const SCROLL_TOP_THRESHOLD: f64 = 500.0;

pub const SHADOW_SCROLLED: &str = "0 4px 20px rgba(0, 0, 0, 0.15)";
pub const SHADOW_RESTING: &str = "0 2px 10px rgba(0, 0, 0, 0.1)";

const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;

/// Deepens the header shadow once the page is scrolled
#[derive(Debug, Default)]
pub struct HeaderShadow;

impl HeaderShadow {
    pub fn apply(document: &mut Document) {
        let Some(header) = document.query_selector(".header") else {
            return;
        };
        let shadow = if document.page_y_offset() > HEADER_SHADOW_THRESHOLD {
            SHADOW_SCROLLED
        } else {
            SHADOW_RESTING
        };
        document.set_style(header, "box-shadow", shadow);
    }
}

impl EventListener for HeaderShadow {
    fn name(&self) -> &'static str {
        "header-shadow"
    }

    fn handle(&mut self, event: &PageEvent, cx: &mut EventContext<'_>) {
        if matches!(event, PageEvent::Scroll) {
            Self::apply(cx.document);
        }
    }
}

/// Smoothly scrolls in-page anchor links, leaving room for the fixed header
#[derive(Debug, Default)]
pub struct SmoothScroll;

impl EventListener for SmoothScroll {
    fn name(&self) -> &'static str {
        "smooth-scroll"
    }

    fn handle(&mut self, event: &PageEvent, cx: &mut EventContext<'_>) {
        let PageEvent::Click { target } = event else {
            return;
        };
        let doc = &mut *cx.document;
        let Some(anchor) = doc.closest(*target, ANCHOR_SELECTOR) else {
            return;
        };
        let href = doc.element(anchor).href().to_string();
        if href == "#" {
            return;
        }
        let Some(section) = doc.query_selector(&href) else {
            return;
        };

        let header_height = doc
            .query_selector(".header")
            .map(|h| doc.element(h).layout.height)
            .unwrap_or(0.0);
        let top = doc.element(section).layout.top - header_height;
        tracing::debug!("Scrolling to {} at {}", href, top);
        doc.scroll_to(top, ScrollBehavior::Smooth);
        cx.prevent_default();
    }
}

/// Shows the back-to-top button past a scroll threshold
#[derive(Debug, Default)]
pub struct ScrollToTop;

impl EventListener for ScrollToTop {
    fn name(&self) -> &'static str {
        "scroll-to-top"
    }

    fn handle(&mut self, event: &PageEvent, cx: &mut EventContext<'_>) {
        let doc = &mut *cx.document;
        let Some(button) = doc.query_selector(".scroll-top") else {
            return;
        };
        match event {
            PageEvent::Scroll => {
                if doc.page_y_offset() > SCROLL_TOP_THRESHOLD {
                    doc.add_class(button, "visible");
                } else {
                    doc.remove_class(button, "visible");
                }
            }
            PageEvent::Click { target } if doc.contains(button, *target) => {
                doc.scroll_to(0.0, ScrollBehavior::Smooth);
            }
            _ => {}
        }
    }
}
