//! Screen layout for the terminal UI

use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Device info header (glass container)
    pub header: Rect,
    /// Transcript and live input line (glass container)
    pub terminal: Rect,
    /// Quick-command hints, hidden when there are no presets
    pub quick_bar: Rect,
    /// Status line
    pub status: Rect,
}

/// Split `area` into header, terminal, quick-command bar and status line
pub fn create(area: Rect, show_quick_bar: bool) -> ScreenAreas {
    let quick_height = if show_quick_bar { 1 } else { 0 };

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(quick_height),
        Constraint::Length(1),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        terminal: chunks[1],
        quick_bar: chunks[2],
        status: chunks[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_standard() {
        let layout = create(Rect::new(0, 0, 80, 24), true);
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.terminal.height, 19);
        assert_eq!(layout.terminal.y, 3);
        assert_eq!(layout.quick_bar.y, 22);
        assert_eq!(layout.status.y, 23);
    }

    #[test]
    fn test_layout_without_quick_bar() {
        let layout = create(Rect::new(0, 0, 80, 24), false);
        assert_eq!(layout.quick_bar.height, 0);
        assert_eq!(layout.terminal.height, 20);
    }

    #[test]
    fn test_layout_small_terminal() {
        let layout = create(Rect::new(0, 0, 40, 8), true);
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.terminal.height, 3);
    }
}
