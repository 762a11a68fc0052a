//! UI module for rendering the TUI

mod components;
mod layout;
mod page;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    // Page first so the fixed chrome paints over it
    page::draw(frame, app);
    layout::draw_header(frame, app);
    layout::draw_dropdown(frame, app);
    layout::draw_scroll_top(frame, app);
    layout::draw_status_bar(frame, app);
}
