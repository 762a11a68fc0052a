//! The page document: element arena, queries, scrolling and timers

use super::element::{Element, ElementId};
use super::selector::Selector;
use super::timers::{TimerAction, TimerId, TimerQueue};
use std::time::{Duration, Instant};

/// Width of one terminal cell in CSS pixels
pub const CELL_WIDTH_PX: f64 = 8.0;
/// Height of one terminal row in CSS pixels
pub const CELL_HEIGHT_PX: f64 = 20.0;
/// Viewports narrower than this use the mobile navigation
pub const MOBILE_BREAKPOINT_PX: f64 = 768.0;

/// Duration of a smooth scroll
const SMOOTH_SCROLL_DURATION: Duration = Duration::from_millis(400);

/// Visible area of the page in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Viewport covering `cols` x `rows` terminal cells
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self {
            width: f64::from(cols) * CELL_WIDTH_PX,
            height: f64::from(rows) * CELL_HEIGHT_PX,
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.width < MOBILE_BREAKPOINT_PX
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: f64,
    to: f64,
    started: Instant,
}

/// Element tree plus window state (scroll offset, viewport, clock, timers)
#[derive(Debug)]
pub struct Document {
    elements: Vec<Element>,
    body: ElementId,
    location_path: String,
    viewport: Viewport,
    scroll_y: f64,
    scroll_animation: Option<ScrollAnimation>,
    timers: TimerQueue,
    now: Instant,
    supports_intersection: bool,
}

impl Document {
    pub fn new(location_path: &str, viewport: Viewport) -> Self {
        Self {
            elements: vec![Element::new("body")],
            body: ElementId(0),
            location_path: location_path.to_string(),
            viewport,
            scroll_y: 0.0,
            scroll_animation: None,
            timers: TimerQueue::default(),
            now: Instant::now(),
            supports_intersection: true,
        }
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Append `element` as the last child of `parent`
    pub fn append(&mut self, parent: ElementId, mut element: Element) -> ElementId {
        let id = ElementId(self.elements.len());
        element.parent = Some(parent);
        element.children.clear();
        self.elements.push(element);
        self.elements[parent.0].children.push(id);
        id
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    // Queries

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
            .map(ElementId)
    }

    /// All elements below `root` in document order, excluding `root`
    pub fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.element(root).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.element(id).children.iter().rev().copied());
        }
        out
    }

    pub fn query_selector(&self, selector: &str) -> Option<ElementId> {
        self.query_selector_in(self.body, selector)
    }

    pub fn query_selector_all(&self, selector: &str) -> Vec<ElementId> {
        self.query_selector_all_in(self.body, selector)
    }

    pub fn query_selector_in(&self, root: ElementId, selector: &str) -> Option<ElementId> {
        self.query_selector_all_in(root, selector).into_iter().next()
    }

    /// Matching descendants of `root`; an invalid selector matches nothing
    pub fn query_selector_all_in(&self, root: ElementId, selector: &str) -> Vec<ElementId> {
        let parsed = match Selector::parse(selector) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid selector {selector:?}: {e}");
                return Vec::new();
            }
        };
        self.descendants(root)
            .into_iter()
            .filter(|id| self.matches(*id, &parsed))
            .collect()
    }

    pub fn matches(&self, id: ElementId, selector: &Selector) -> bool {
        if !selector.subject().matches(self.element(id)) {
            return false;
        }
        let mut cursor = self.element(id).parent;
        for compound in selector.ancestors() {
            loop {
                match cursor {
                    Some(ancestor) => {
                        cursor = self.element(ancestor).parent;
                        if compound.matches(self.element(ancestor)) {
                            break;
                        }
                    }
                    None => return false,
                }
            }
        }
        true
    }

    /// `id` itself or its nearest ancestor matching `selector`
    pub fn closest(&self, id: ElementId, selector: &str) -> Option<ElementId> {
        let parsed = Selector::parse(selector).ok()?;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if self.matches(current, &parsed) {
                return Some(current);
            }
            cursor = self.element(current).parent;
        }
        None
    }

    /// Whether `node` is `ancestor` or one of its descendants
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.element(current).parent;
        }
        false
    }

    /// Not hidden by `display: none` on itself or an ancestor
    pub fn is_rendered(&self, id: ElementId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if self.element(current).is_display_none() {
                return false;
            }
            cursor = self.element(current).parent;
        }
        true
    }

    // Element mutation shortcuts

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id).has_class(class)
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        self.element_mut(id).add_class(class);
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        self.element_mut(id).remove_class(class);
    }

    pub fn toggle_class(&mut self, id: ElementId, class: &str) -> bool {
        self.element_mut(id).toggle_class(class)
    }

    pub fn set_style(&mut self, id: ElementId, property: &str, value: &str) {
        self.element_mut(id).set_style(property, value);
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) {
        self.element_mut(id).text = text.to_string();
    }

    pub fn value(&self, id: ElementId) -> &str {
        &self.element(id).value
    }

    pub fn set_value(&mut self, id: ElementId, value: &str) {
        self.element_mut(id).value = value.to_string();
    }

    pub fn set_checked(&mut self, id: ElementId, checked: bool) {
        self.element_mut(id).checked = checked;
    }

    /// Restore every control under `form` to its default value
    pub fn reset_form(&mut self, form: ElementId) {
        for id in self.descendants(form) {
            let el = self.element_mut(id);
            if matches!(el.tag.as_str(), "input" | "select" | "textarea") {
                el.value = el.default_value.clone();
                el.checked = el.default_checked;
            }
        }
    }

    // Window state

    pub fn location_path(&self) -> &str {
        &self.location_path
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.scroll_y = self.scroll_y.clamp(0.0, self.max_scroll());
    }

    pub fn supports_intersection(&self) -> bool {
        self.supports_intersection
    }

    pub fn set_supports_intersection(&mut self, supported: bool) {
        self.supports_intersection = supported;
    }

    pub fn document_height(&self) -> f64 {
        self.elements
            .iter()
            .map(|e| e.layout.bottom())
            .fold(0.0, f64::max)
    }

    pub fn max_scroll(&self) -> f64 {
        (self.document_height() - self.viewport.height).max(0.0)
    }

    pub fn page_y_offset(&self) -> f64 {
        self.scroll_y
    }

    /// Jump to `y` (clamped), cancelling any smooth scroll.
    /// Returns whether the offset changed.
    pub fn set_page_y_offset(&mut self, y: f64) -> bool {
        self.scroll_animation = None;
        let y = y.clamp(0.0, self.max_scroll());
        let changed = (y - self.scroll_y).abs() > f64::EPSILON;
        self.scroll_y = y;
        changed
    }

    pub fn scroll_by(&mut self, dy: f64) -> bool {
        let base = self.scroll_target().unwrap_or(self.scroll_y);
        self.set_page_y_offset(base + dy)
    }

    /// `window.scrollTo({ top, behavior })`
    pub fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) -> bool {
        match behavior {
            ScrollBehavior::Instant => self.set_page_y_offset(top),
            ScrollBehavior::Smooth => {
                let to = top.clamp(0.0, self.max_scroll());
                if (to - self.scroll_y).abs() <= f64::EPSILON {
                    self.scroll_animation = None;
                    return false;
                }
                self.scroll_animation = Some(ScrollAnimation {
                    from: self.scroll_y,
                    to,
                    started: self.now,
                });
                true
            }
        }
    }

    /// `element.scrollIntoView({ block: 'center', behavior })`
    pub fn scroll_into_view_centered(&mut self, id: ElementId, behavior: ScrollBehavior) -> bool {
        let layout = self.element(id).layout;
        let top = layout.top + layout.height / 2.0 - self.viewport.height / 2.0;
        self.scroll_to(top, behavior)
    }

    /// Where a running smooth scroll will end
    pub fn scroll_target(&self) -> Option<f64> {
        self.scroll_animation.map(|a| a.to)
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll_animation.is_some()
    }

    // Clock and timers

    pub fn now(&self) -> Instant {
        self.now
    }

    /// Advance the page clock; never moves backwards
    pub fn set_now(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Step a running smooth scroll to the current clock.
    /// Returns whether the offset moved.
    pub fn tick_scroll(&mut self) -> bool {
        let Some(animation) = self.scroll_animation else {
            return false;
        };
        let elapsed = self.now.saturating_duration_since(animation.started);
        let progress = elapsed.as_secs_f32() / SMOOTH_SCROLL_DURATION.as_secs_f32();
        let previous = self.scroll_y;

        if progress >= 1.0 {
            self.scroll_y = animation.to;
            self.scroll_animation = None;
        } else {
            let eased = f64::from(simple_easing::cubic_out(progress));
            self.scroll_y = animation.from + (animation.to - animation.from) * eased;
        }
        (self.scroll_y - previous).abs() > f64::EPSILON
    }

    pub fn set_timeout(&mut self, delay: Duration, action: TimerAction) -> TimerId {
        self.timers.schedule(self.now, delay, action)
    }

    /// `clearTimeout`; returns false when the timer already fired
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.timers.cancel(id)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Run every timer due at the current clock; returns how many fired
    pub fn run_due_timers(&mut self) -> usize {
        let due = self.timers.take_due(self.now);
        let count = due.len();
        for action in due {
            match action {
                TimerAction::HideElement(id) => self.set_style(id, "display", "none"),
            }
        }
        count
    }
}
