//! Viewport-driven behaviors: lazy image loading and reveal-on-scroll

use crate::dom::{Document, ElementId, EventContext, EventListener, PageEvent, VisibilityObserver};

pub const LAZY_IMAGE_THRESHOLD: f64 = 0.0;
pub const REVEAL_THRESHOLD: f64 = 0.1;

fn load_image(document: &mut Document, img: ElementId) {
    let el = document.element_mut(img);
    if let Some(src) = el.remove_attribute("data-src") {
        tracing::debug!("Loading image {}", src);
        el.set_attribute("src", &src);
    }
}

/// Swaps `data-src` into `src` once an image nears the viewport
#[derive(Debug)]
pub struct LazyImages {
    observer: VisibilityObserver,
}

impl Default for LazyImages {
    fn default() -> Self {
        Self::new()
    }
}

impl LazyImages {
    pub fn new() -> Self {
        Self {
            observer: VisibilityObserver::new(LAZY_IMAGE_THRESHOLD),
        }
    }

    pub fn pending(&self) -> usize {
        self.observer.len()
    }

    fn install(&mut self, document: &mut Document) {
        self.observer = VisibilityObserver::new(LAZY_IMAGE_THRESHOLD);
        let images = document.query_selector_all("img[data-src]");

        if !document.supports_intersection() {
            tracing::debug!("No visibility observation, loading {} images", images.len());
            for img in images {
                load_image(document, img);
            }
            return;
        }

        for img in images {
            self.observer.observe(img);
        }
        self.check(document);
    }

    fn check(&mut self, document: &mut Document) {
        for img in self.observer.take_intersecting(document) {
            load_image(document, img);
        }
    }
}

impl EventListener for LazyImages {
    fn name(&self) -> &'static str {
        "lazy-images"
    }

    fn handle(&mut self, event: &PageEvent, cx: &mut EventContext<'_>) {
        match event {
            PageEvent::DomContentLoaded => self.install(cx.document),
            PageEvent::Scroll | PageEvent::Resize => self.check(cx.document),
            _ => {}
        }
    }
}

/// Adds `animate-in` to `.animate-on-scroll` elements the first time they
/// are at least 10% visible
#[derive(Debug)]
pub struct RevealOnScroll {
    observer: VisibilityObserver,
}

impl Default for RevealOnScroll {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealOnScroll {
    pub fn new() -> Self {
        Self {
            observer: VisibilityObserver::new(REVEAL_THRESHOLD),
        }
    }

    pub fn pending(&self) -> usize {
        self.observer.len()
    }

    fn install(&mut self, document: &mut Document) {
        self.observer = VisibilityObserver::new(REVEAL_THRESHOLD);
        let targets = document.query_selector_all(".animate-on-scroll");

        if !document.supports_intersection() {
            for id in targets {
                document.add_class(id, "animate-in");
            }
            return;
        }

        for id in targets {
            self.observer.observe(id);
        }
        self.check(document);
    }

    fn check(&mut self, document: &mut Document) {
        for id in self.observer.take_intersecting(document) {
            document.add_class(id, "animate-in");
        }
    }
}

impl EventListener for RevealOnScroll {
    fn name(&self) -> &'static str {
        "reveal-on-scroll"
    }

    fn handle(&mut self, event: &PageEvent, cx: &mut EventContext<'_>) {
        match event {
            PageEvent::DomContentLoaded => self.install(cx.document),
            PageEvent::Scroll | PageEvent::Resize => self.check(cx.document),
            _ => {}
        }
    }
}
