//! Keyboard focus over the page's interactive elements

use crate::dom::{Document, ElementId};

/// Whether `id` is shown at the current viewport width.
///
/// Mirrors the site's responsive rules: on narrow viewports the navigation
/// links live in a dropdown that only shows while the menu is active, and
/// the hamburger toggle only exists on narrow viewports.
pub fn is_displayed(document: &Document, id: ElementId) -> bool {
    if !document.is_rendered(id) {
        return false;
    }
    let mobile = document.viewport().is_mobile();
    if document.closest(id, ".mobile-toggle").is_some() {
        return mobile;
    }
    if mobile {
        if let Some(menu) = document.closest(id, ".nav-menu") {
            return document.has_class(menu, "active");
        }
    }
    if document.closest(id, ".scroll-top").is_some() {
        return document
            .query_selector(".scroll-top")
            .is_some_and(|b| document.has_class(b, "visible"));
    }
    true
}

/// Ordered ring of focusable elements with a cursor
#[derive(Debug, Clone, Default)]
pub struct FocusRing {
    items: Vec<ElementId>,
    current: Option<ElementId>,
}

impl FocusRing {
    /// Collect focusable elements in document order, keeping the current
    /// focus when it is still reachable
    pub fn rebuild(&mut self, document: &Document) {
        self.items = document
            .descendants(document.body())
            .into_iter()
            .filter(|&id| document.element(id).is_focusable() && is_displayed(document, id))
            .collect();
        if let Some(current) = self.current {
            if !self.items.contains(&current) {
                self.current = None;
            }
        }
    }

    pub fn items(&self) -> &[ElementId] {
        &self.items
    }

    pub fn current(&self) -> Option<ElementId> {
        self.current
    }

    pub fn is_focused(&self, id: ElementId) -> bool {
        self.current == Some(id)
    }

    /// Focus `id` if it is part of the ring
    pub fn focus(&mut self, id: ElementId) -> bool {
        if self.items.contains(&id) {
            self.current = Some(id);
            true
        } else {
            false
        }
    }

    pub fn blur(&mut self) {
        self.current = None;
    }

    pub fn next(&mut self) -> Option<ElementId> {
        self.step(1)
    }

    pub fn prev(&mut self) -> Option<ElementId> {
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> Option<ElementId> {
        if self.items.is_empty() {
            self.current = None;
            return None;
        }
        let len = self.items.len() as isize;
        let index = match self.current.and_then(|c| self.items.iter().position(|i| *i == c)) {
            Some(pos) => (pos as isize + delta).rem_euclid(len),
            None if delta >= 0 => 0,
            None => len - 1,
        };
        self.current = Some(self.items[index as usize]);
        self.current
    }
}
