//! Status bar widget
//!
//! Shows the session status, inferred prompt mode, scroll position and the
//! keys that do something in the current phase.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use netbak_app::{AppState, SessionStatus};

use crate::theme::styles;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner glyph for `frame`
pub(crate) fn spinner(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

/// Status bar widget showing session state and key hints
pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn state_indicator(&self) -> Span<'static> {
        let status = self.state.session.status();
        let (icon, label, style) = styles::status_indicator(status);
        let icon = if self.state.is_busy() {
            spinner(self.state.spinner_frame)
        } else {
            icon
        };
        Span::styled(format!(" {} {} ", icon, label), style)
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.state.session.status() {
            SessionStatus::Ready => &[
                ("Enter", "run"),
                ("Tab", "complete"),
                ("↑↓", "history"),
                ("^L", "clear"),
                ("^D", "disconnect"),
                ("Esc", "quit"),
            ],
            SessionStatus::Executing => &[("^C", "interrupt"), ("Esc", "quit")],
            SessionStatus::Connecting | SessionStatus::Failed | SessionStatus::Disconnected => {
                &[("Esc", "quit")]
            }
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let separator = || Span::styled("│ ", styles::text_muted());
        let mut spans = vec![self.state_indicator(), separator()];

        if self.state.session.is_connected() {
            spans.push(Span::styled(
                format!("view: {} ", self.state.session.prompt.state.label()),
                styles::text_secondary(),
            ));
            spans.push(separator());
        }

        if self.state.scroll.offset > 0 {
            spans.push(Span::styled(
                format!("↑{} ", self.state.scroll.offset),
                styles::accent(),
            ));
            spans.push(separator());
        }

        for (key, action) in self.hints() {
            spans.push(Span::styled(*key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}  ", action), styles::text_muted()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
