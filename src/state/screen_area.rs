//! Screen geometry shared by rendering and mouse hit-testing
//!
//! ```text
//! Row 0-2:  Fixed site header (brand, navigation, phone)
//! Row 3+:   Page body, scrolled under the header
//!           - mobile menu dropdown overlays rows 3+ while open
//!           - back-to-top button floats bottom right
//! Bottom:   Status bar (1 row)
//! ```
//!
//! Page coordinates map to rows at `CELL_HEIGHT_PX` per row, so the body's
//! first section (below the 60px header) starts on row 3 when unscrolled.

use super::focus::is_displayed;
use crate::dom::{Document, ElementId, Viewport, CELL_HEIGHT_PX};
use ratatui::layout::Rect;

/// Height of the fixed header in rows
pub const HEADER_ROWS: u16 = 3;
/// Height of the status bar
pub const STATUS_BAR_HEIGHT: u16 = 1;
/// Row inside the header where items are drawn
pub const HEADER_ITEM_ROW: u16 = 1;
/// Gap between header items
const HEADER_GAP: u16 = 3;
const SCROLL_TOP_WIDTH: u16 = 5;
const SCROLL_TOP_HEIGHT: u16 = 3;

/// Page viewport for a terminal of `cols` x `rows`
pub fn viewport_for(cols: u16, rows: u16) -> Viewport {
    Viewport::from_cells(cols, rows.saturating_sub(STATUS_BAR_HEIGHT))
}

/// Rows available to the page
pub fn page_rows(terminal_rows: u16) -> u16 {
    terminal_rows.saturating_sub(STATUS_BAR_HEIGHT)
}

/// Screen row of an element's top edge (negative when scrolled past)
pub fn element_row(document: &Document, id: ElementId) -> i32 {
    let top = document.element(id).layout.top - document.page_y_offset();
    (top / CELL_HEIGHT_PX).floor() as i32
}

/// Height of an element in rows
pub fn element_rows(document: &Document, id: ElementId) -> u16 {
    (document.element(id).layout.height / CELL_HEIGHT_PX).round() as u16
}

/// Page-space y coordinate at the middle of screen `row`
pub fn page_y_at_row(document: &Document, row: u16) -> f64 {
    document.page_y_offset() + (f64::from(row) + 0.5) * CELL_HEIGHT_PX
}

/// Lies in the fixed header or is the floating back-to-top button
pub fn is_fixed(document: &Document, id: ElementId) -> bool {
    document.closest(id, ".header").is_some() || document.closest(id, ".scroll-top").is_some()
}

/// A header element placed on the item row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderItem {
    pub id: ElementId,
    pub x: u16,
    pub width: u16,
    pub label: String,
}

impl HeaderItem {
    pub fn contains_col(&self, col: u16) -> bool {
        col >= self.x && col < self.x + self.width
    }
}

fn width_of(label: &str) -> u16 {
    label.chars().count() as u16
}

/// Mobile toggle glyph for the menu state
pub fn toggle_label(document: &Document, toggle: ElementId) -> &'static str {
    if document.has_class(toggle, "active") {
        "✕"
    } else {
        "☰"
    }
}

/// Place the header's interactive items across `cols` columns
pub fn header_items(document: &Document, cols: u16) -> Vec<HeaderItem> {
    let mut items = Vec::new();
    let mut x = 1;

    if let Some(logo) = document.query_selector(".header .logo") {
        let label = document.element(logo).text.clone();
        let width = width_of(&label);
        items.push(HeaderItem {
            id: logo,
            x,
            width,
            label,
        });
        x += width + HEADER_GAP;
    }

    let mut right = cols.saturating_sub(1);

    if document.viewport().is_mobile() {
        if let Some(toggle) = document.query_selector(".mobile-toggle") {
            let label = toggle_label(document, toggle).to_string();
            right = right.saturating_sub(width_of(&label));
            items.push(HeaderItem {
                id: toggle,
                x: right,
                width: width_of(&label),
                label,
            });
            right = right.saturating_sub(HEADER_GAP);
        }
    } else {
        for link in document.query_selector_all(".nav-link") {
            let label = document.element(link).text.clone();
            let width = width_of(&label);
            items.push(HeaderItem {
                id: link,
                x,
                width,
                label,
            });
            x += width + HEADER_GAP;
        }
    }

    if let Some(phone) = document.query_selector(".header-phone") {
        let label = format!("☎ {}", document.element(phone).text);
        let width = width_of(&label);
        // Dropped when it would collide with the items on the left
        if right >= width && right - width >= x {
            items.push(HeaderItem {
                id: phone,
                x: right - width,
                width,
                label,
            });
        }
    }

    items
}

/// Navigation links shown in the open mobile dropdown, with their rows
pub fn dropdown_items(document: &Document) -> Vec<(ElementId, u16)> {
    if !document.viewport().is_mobile() {
        return Vec::new();
    }
    let Some(menu) = document.query_selector(".nav-menu") else {
        return Vec::new();
    };
    if !document.has_class(menu, "active") {
        return Vec::new();
    }
    document
        .query_selector_all_in(menu, ".nav-link")
        .into_iter()
        .zip(HEADER_ROWS..)
        .collect()
}

/// Where the back-to-top button floats, when shown
pub fn scroll_top_rect(document: &Document, cols: u16, rows: u16) -> Option<(ElementId, Rect)> {
    let button = document.query_selector(".scroll-top")?;
    if !is_displayed(document, button) {
        return None;
    }
    let bottom = page_rows(rows);
    if cols < SCROLL_TOP_WIDTH + 2 || bottom < HEADER_ROWS + SCROLL_TOP_HEIGHT {
        return None;
    }
    Some((
        button,
        Rect {
            x: cols - SCROLL_TOP_WIDTH - 2,
            y: bottom - SCROLL_TOP_HEIGHT,
            width: SCROLL_TOP_WIDTH,
            height: SCROLL_TOP_HEIGHT,
        },
    ))
}

/// Element under the terminal cell (`col`, `row`)
pub fn hit_test(
    document: &Document,
    cols: u16,
    rows: u16,
    col: u16,
    row: u16,
) -> Option<ElementId> {
    if row >= page_rows(rows) {
        return None;
    }

    if let Some((button, rect)) = scroll_top_rect(document, cols, rows) {
        if col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
        {
            return Some(button);
        }
    }

    if let Some((link, _)) = dropdown_items(document).into_iter().find(|(_, r)| *r == row) {
        return Some(link);
    }

    if row < HEADER_ROWS {
        let header = document.query_selector(".header")?;
        if row == HEADER_ITEM_ROW {
            if let Some(item) = header_items(document, cols)
                .into_iter()
                .find(|item| item.contains_col(col))
            {
                return Some(item.id);
            }
        }
        return Some(header);
    }

    let y = page_y_at_row(document, row);
    let body = document.body();
    let hit = document.descendants(body).into_iter().rev().find(|&id| {
        let layout = document.element(id).layout;
        id != body
            && layout.height > 0.0
            && y >= layout.top
            && y < layout.bottom()
            && !is_fixed(document, id)
            && document.is_rendered(id)
    });
    Some(hit.unwrap_or(body))
}
