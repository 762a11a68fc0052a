//! Viewport visibility observation (the `IntersectionObserver` of the page)

use super::document::Document;
use super::element::ElementId;

/// Tracks a set of elements and reports the ones that scrolled into view
#[derive(Debug, Clone)]
pub struct VisibilityObserver {
    threshold: f64,
    observed: Vec<ElementId>,
}

impl VisibilityObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            observed: Vec::new(),
        }
    }

    pub fn observe(&mut self, id: ElementId) {
        if !self.observed.contains(&id) {
            self.observed.push(id);
        }
    }

    pub fn unobserve(&mut self, id: ElementId) {
        self.observed.retain(|o| *o != id);
    }

    pub fn is_observing(&self, id: ElementId) -> bool {
        self.observed.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Return the observed elements currently intersecting the viewport
    /// and stop observing them.
    pub fn take_intersecting(&mut self, document: &Document) -> Vec<ElementId> {
        let threshold = self.threshold;
        let mut hits = Vec::new();
        self.observed.retain(|&id| {
            if is_intersecting(document, id, threshold) {
                hits.push(id);
                false
            } else {
                true
            }
        });
        hits
    }
}

/// Fraction of the element's box inside the viewport, or `None` when it
/// does not touch the viewport at all
pub fn intersection_ratio(document: &Document, id: ElementId) -> Option<f64> {
    if !document.is_rendered(id) {
        return None;
    }
    let layout = document.element(id).layout;
    let view_top = document.page_y_offset();
    let view_bottom = view_top + document.viewport().height;

    if layout.height <= 0.0 {
        return (layout.top >= view_top && layout.top <= view_bottom).then_some(1.0);
    }

    let overlap = layout.bottom().min(view_bottom) - layout.top.max(view_top);
    if overlap <= 0.0 {
        return None;
    }
    Some((overlap / layout.height).min(1.0))
}

fn is_intersecting(document: &Document, id: ElementId, threshold: f64) -> bool {
    match intersection_ratio(document, id) {
        Some(ratio) => threshold <= 0.0 || ratio >= threshold,
        None => false,
    }
}
