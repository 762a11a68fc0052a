//! Page body: the scrolled document between header and status bar

use super::components::{button, checkbox, select_field, text_field, ButtonKind};
use crate::app::App;
use crate::contact::FORM_MESSAGE_ID;
use crate::dom::{Document, Element, ElementId};
use crate::state::{element_row, element_rows, is_displayed, is_fixed, page_rows, HEADER_ROWS};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

/// Columns kept free on each side of the page
const MARGIN: u16 = 2;
/// Widest the content column grows
const MAX_CONTENT_WIDTH: u16 = 100;

/// Horizontal extent of the content column
fn content_columns(cols: u16) -> (u16, u16) {
    let width = cols.saturating_sub(MARGIN * 2).min(MAX_CONTENT_WIDTH);
    let x = (cols - width) / 2;
    (x, width)
}

/// Draw every visible page element
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let doc = &app.document;
    let (x, width) = content_columns(area.width);
    if width == 0 {
        return;
    }
    let visible = (i32::from(HEADER_ROWS), i32::from(page_rows(area.height)));

    for id in doc.descendants(doc.body()) {
        if is_fixed(doc, id) || !is_displayed(doc, id) {
            continue;
        }
        let top = element_row(doc, id);
        let height = element_rows(doc, id);
        if height == 0 || top >= visible.1 || top + i32::from(height) <= visible.0 {
            continue;
        }
        let Some(widget) = element_widget(doc, id, app.focus.is_focused(id)) else {
            continue;
        };
        blit(frame.buffer_mut(), widget, x, width, top, height, visible);
    }
}

/// Render `widget` at full size off screen and copy the rows inside `visible`
fn blit(
    target: &mut Buffer,
    widget: Paragraph<'_>,
    x: u16,
    width: u16,
    top: i32,
    height: u16,
    visible: (i32, i32),
) {
    let mut scratch = Buffer::empty(Rect::new(0, 0, width, height));
    widget.render(scratch.area, &mut scratch);

    let bounds = target.area;
    for dy in 0..height {
        let row = top + i32::from(dy);
        if row < visible.0 || row >= visible.1 {
            continue;
        }
        let Ok(row) = u16::try_from(row) else {
            continue;
        };
        if row >= bounds.bottom() {
            break;
        }
        for dx in 0..width {
            let col = x + dx;
            if col >= bounds.right() {
                break;
            }
            target[(col, row)] = scratch[(dx, dy)].clone();
        }
    }
}

/// Whether the element is still waiting for its reveal animation
fn is_unrevealed(doc: &Document, id: ElementId) -> bool {
    doc.closest(id, ".animate-on-scroll")
        .is_some_and(|el| !doc.has_class(el, "animate-in"))
}

fn label_of(el: &Element) -> &str {
    el.attribute("data-label").unwrap_or_default()
}

/// Widget for one element, or `None` for plain containers
fn element_widget(doc: &Document, id: ElementId, is_focused: bool) -> Option<Paragraph<'static>> {
    let el = doc.element(id);
    let dim = if is_unrevealed(doc, id) {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let widget = match el.tag.as_str() {
        "h1" => Paragraph::new(el.text.clone())
            .style(dim.fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .wrap(Wrap { trim: true }),
        "h2" => Paragraph::new(Line::from(vec![
            Span::styled("▍", Style::default().fg(Color::Yellow)),
            Span::raw(el.text.clone()),
        ]))
        .style(dim.add_modifier(Modifier::BOLD)),
        "h3" => Paragraph::new(format!("  {}", el.text)).style(dim.add_modifier(Modifier::BOLD)),
        "p" if doc.closest(id, ".service-card").is_some() => {
            Paragraph::new(format!("  {}", el.text))
                .style(dim)
                .wrap(Wrap { trim: false })
        }
        "p" => Paragraph::new(el.text.clone())
            .style(dim)
            .wrap(Wrap { trim: true }),
        "a" | "button" if el.has_class("btn") => {
            let kind = if el.has_class("btn-outline") {
                ButtonKind::Outline
            } else {
                ButtonKind::Primary
            };
            button(&el.text, kind, is_focused, !el.has_attribute("disabled"))
        }
        "a" => {
            let mut style = Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED);
            if is_focused {
                style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
            }
            Paragraph::new(el.text.clone()).style(style)
        }
        "input" if el.is_checkbox() => checkbox(label_of(el), el.checked, is_focused),
        "input" => text_field(label_of(el), &el.value, is_focused, false),
        "textarea" => text_field(label_of(el), &el.value, is_focused, true),
        "select" => select_field(label_of(el), el.selected_label().unwrap_or_default(), is_focused),
        "img" => image(el, dim),
        "div" if el.has_class("service-card") => Paragraph::new("").block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray).patch(dim)),
        ),
        "div" if el.id.as_deref() == Some(FORM_MESSAGE_ID) => form_message(el),
        _ => return None,
    };
    Some(widget)
}

/// Placeholder box for a gallery image
fn image(el: &Element, dim: Style) -> Paragraph<'static> {
    let alt = el.attribute("alt").unwrap_or_default().to_string();
    let body = match el.attribute("src") {
        Some(src) => Line::from(vec![
            Span::styled("▣ ", Style::default().fg(Color::Green)),
            Span::raw(src.to_string()),
        ]),
        None => Line::from(Span::styled(
            "░░ laster ░░",
            Style::default().fg(Color::DarkGray),
        )),
    };
    Paragraph::new(vec![Line::default(), body])
        .alignment(Alignment::Center)
        .style(dim)
        .block(
            Block::default()
                .title(format!(" {alt} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray).patch(dim)),
        )
}

fn form_message(el: &Element) -> Paragraph<'static> {
    let color = if el.has_class("success") {
        Color::Green
    } else if el.has_class("error") {
        Color::Red
    } else {
        Color::Gray
    };
    Paragraph::new(el.text.clone())
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
}
