//! Quick-command hint bar

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use netbak_app::QuickCommand;

use crate::theme::styles;

/// Number of presets reachable with F1..F9
const MAX_SLOTS: usize = 9;

/// One-line bar listing `F<n> label` for each preset
pub struct QuickCommandBar<'a> {
    commands: &'a [QuickCommand],
    enabled: bool,
}

impl<'a> QuickCommandBar<'a> {
    pub fn new(commands: &'a [QuickCommand]) -> Self {
        Self {
            commands,
            enabled: true,
        }
    }

    /// Dim the bar when presets can't be loaded (not `Ready`)
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Widget for QuickCommandBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let (key_style, label_style) = if self.enabled {
            (styles::keybinding(), styles::text_secondary())
        } else {
            (styles::text_muted(), styles::text_muted())
        };

        let mut spans = vec![Span::raw(" ")];
        for (i, cmd) in self.commands.iter().take(MAX_SLOTS).enumerate() {
            spans.push(Span::styled(format!("F{}", i + 1), key_style));
            spans.push(Span::styled(format!(" {}  ", cmd.label), label_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_lists_presets_with_keys() {
        let commands = vec![
            QuickCommand::new("Version", "display version"),
            QuickCommand::new("Routes", "display ip routing-table"),
        ];
        let mut term = TestTerminal::new();
        term.render_widget(QuickCommandBar::new(&commands), Rect::new(0, 0, 80, 1));
        assert!(term.line_contains(0, "F1 Version"));
        assert!(term.line_contains(0, "F2 Routes"));
    }

    #[test]
    fn test_caps_at_nine_slots() {
        let commands: Vec<_> = (0..12)
            .map(|i| QuickCommand::new(&format!("c{}", i), "help"))
            .collect();
        let mut term = TestTerminal::with_size(200, 1);
        term.render_widget(QuickCommandBar::new(&commands), Rect::new(0, 0, 200, 1));
        assert!(term.buffer_contains("F9 c8"));
        assert!(!term.buffer_contains("F10"));
    }
}
