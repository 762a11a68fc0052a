//! Form control widgets

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const CURSOR: &str = "▌";

fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn titled_block(label: &str, is_focused: bool) -> Block<'static> {
    Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused))
}

/// A text input or textarea with its label in the border
pub fn text_field(
    label: &str,
    value: &str,
    is_focused: bool,
    is_multiline: bool,
) -> Paragraph<'static> {
    let cursor = Span::styled(
        if is_focused { CURSOR } else { "" },
        Style::default().fg(Color::Cyan),
    );

    let lines = if value.is_empty() && !is_focused {
        vec![Line::from(Span::styled(
            "(empty)",
            Style::default().fg(Color::DarkGray),
        ))]
    } else if is_multiline {
        let mut lines: Vec<Line> = value.split('\n').map(|l| Line::from(l.to_string())).collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor);
        }
        lines
    } else {
        vec![Line::from(vec![Span::raw(value.to_string()), cursor])]
    };

    // Keep the cursor line in view once a textarea overflows
    let inner_rows = if is_multiline { 3 } else { 1 };
    let scroll = (lines.len() as u16).saturating_sub(inner_rows);

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(titled_block(label, is_focused))
}

/// A select showing the chosen option between cycling arrows
pub fn select_field(label: &str, selected: &str, is_focused: bool) -> Paragraph<'static> {
    let arrow_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Paragraph::new(Line::from(vec![
        Span::styled("◂ ", arrow_style),
        Span::raw(selected.to_string()),
        Span::styled(" ▸", arrow_style),
    ]))
    .block(titled_block(label, is_focused))
}

/// A single-row checkbox with its label
pub fn checkbox(label: &str, checked: bool, is_focused: bool) -> Paragraph<'static> {
    let mark = if checked { "[x]" } else { "[ ]" };
    let style = if is_focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Paragraph::new(format!("{mark} {label}")).style(style)
}
