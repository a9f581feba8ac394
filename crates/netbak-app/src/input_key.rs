//! Terminal-library-independent key events
//!
//! The TUI converts crossterm events into [`InputKey`] at its boundary so the
//! session logic (and the headless runner) never depend on crossterm.

/// A single key press as the session logic sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKey {
    /// Printable character
    Char(char),
    /// Character with Ctrl held (Ctrl+c arrives as `CharCtrl('c')`)
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
    Delete,

    /// Function key F1-F12
    F(u8),
}

impl InputKey {
    /// Quick-command slot bound to this key (F1 -> 0 ... F9 -> 8)
    pub fn quick_command_slot(self) -> Option<usize> {
        match self {
            InputKey::F(n @ 1..=9) => Some(usize::from(n - 1)),
            _ => None,
        }
    }
}
