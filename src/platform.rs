//! Platform-specific configuration

use anyhow::Result;
use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for the send shortcut
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SEND_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SEND_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Send shortcut display for the status bar
/// Ctrl+S works on all platforms
pub const SEND_SHORTCUT: &str = "^S";

/// Where `tel:` links put the number, since a terminal cannot dial
#[cfg_attr(test, mockall::automock)]
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

/// Whether `modifiers` carry the send modifier (Ctrl is accepted everywhere)
pub fn is_send_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.contains(SEND_MODIFIER) || modifiers.contains(KeyModifiers::CONTROL)
}
