//! Button component for TUI

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Visual weight of a page button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// Filled call to action (`.btn`)
    Primary,
    /// Secondary action (`.btn-outline`)
    Outline,
}

/// A bordered button, three rows tall
pub fn button(
    label: &str,
    kind: ButtonKind,
    is_focused: bool,
    is_enabled: bool,
) -> Paragraph<'static> {
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if kind == ButtonKind::Primary {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };

    let text_style = if is_focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if kind == ButtonKind::Primary {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let border_type = match kind {
        ButtonKind::Primary => BorderType::Thick,
        ButtonKind::Outline => BorderType::Rounded,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(border_style);

    Paragraph::new(format!(" {label} "))
        .alignment(Alignment::Center)
        .style(text_style)
        .block(block)
}
