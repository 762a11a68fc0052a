//! Layout components (header, dropdown, back-to-top button, status bar)

use super::components::{button, ButtonKind};
use crate::app::App;
use crate::contact::LOADING_LABEL;
use crate::platform::SEND_SHORTCUT;
use crate::site::SHADOW_SCROLLED;
use crate::state::{
    dropdown_items, header_items, scroll_top_rect, HEADER_ITEM_ROW, HEADER_ROWS,
    STATUS_BAR_HEIGHT,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Draw the fixed site header
pub fn draw_header(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let doc = &app.document;
    let header_area = Rect {
        height: HEADER_ROWS.min(area.height),
        ..area
    };

    // The scrolled shadow reads as a heavier bottom rule
    let scrolled = doc
        .query_selector(".header")
        .and_then(|h| doc.element(h).style("box-shadow"))
        == Some(SHADOW_SCROLLED);
    let border_style = if scrolled {
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    frame.render_widget(Clear, header_area);
    frame.render_widget(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(border_style),
        header_area,
    );

    if area.height <= HEADER_ITEM_ROW {
        return;
    }
    for item in header_items(doc, area.width) {
        let el = doc.element(item.id);
        let mut style = if el.has_class("logo") {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else if el.has_class("header-phone") {
            Style::default().fg(Color::Green)
        } else if el.has_class("active") {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default()
        };
        if app.focus.is_focused(item.id) {
            style = style.fg(Color::Cyan).add_modifier(Modifier::REVERSED);
        }

        let rect = Rect {
            x: item.x,
            y: HEADER_ITEM_ROW,
            width: item.width,
            height: 1,
        }
        .intersection(area);
        frame.render_widget(Paragraph::new(item.label).style(style), rect);
    }
}

/// Draw the open mobile menu over the page
pub fn draw_dropdown(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let doc = &app.document;

    for (link, row) in dropdown_items(doc) {
        if row >= area.height.saturating_sub(STATUS_BAR_HEIGHT) {
            break;
        }
        let el = doc.element(link);
        let mut style = Style::default().bg(Color::Black);
        if el.has_class("active") {
            style = style.fg(Color::Yellow);
        }
        if app.focus.is_focused(link) {
            style = style.fg(Color::Cyan).add_modifier(Modifier::REVERSED);
        }
        let rect = Rect {
            x: 0,
            y: row,
            width: area.width,
            height: 1,
        };
        frame.render_widget(Clear, rect);
        frame.render_widget(Paragraph::new(format!("  {}", el.text)).style(style), rect);
    }
}

/// Draw the floating back-to-top button
pub fn draw_scroll_top(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let Some((id, rect)) = scroll_top_rect(&app.document, area.width, area.height) else {
        return;
    };
    let label = &app.document.element(id).text;
    frame.render_widget(Clear, rect);
    frame.render_widget(
        button(label, ButtonKind::Outline, app.focus.is_focused(id), true),
        rect,
    );
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(STATUS_BAR_HEIGHT),
        width: area.width,
        height: STATUS_BAR_HEIGHT.min(area.height),
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", app.document.location_path()),
        Style::default().fg(Color::Blue),
    )];

    if app.submission_pending() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(LOADING_LABEL, Style::default().fg(Color::Yellow)));
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.as_str(), Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Key hints on the right
    let hints = format!(" Tab:focus  Enter:activate  {SEND_SHORTCUT}:send  Esc:quit ");
    let width = hints.chars().count() as u16;
    let hint_area = Rect {
        x: area.width.saturating_sub(width),
        width: width.min(area.width),
        ..status_area
    };
    let hint_widget =
        Paragraph::new(hints).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(hint_widget, hint_area);
}
