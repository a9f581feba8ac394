//! Device info header

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use netbak_app::TerminalSession;

use crate::theme::{palette, styles};

/// Header showing the device and the connection indicator
pub struct DeviceHeader<'a> {
    session: &'a TerminalSession,
}

impl<'a> DeviceHeader<'a> {
    pub fn new(session: &'a TerminalSession) -> Self {
        Self { session }
    }

    fn spans(&self) -> Vec<Span<'a>> {
        let (icon, label, status_style) = styles::status_indicator(self.session.status());
        let separator = || Span::styled(" │ ", styles::text_muted());

        let mut spans = vec![
            Span::styled(format!("{} ", icon), status_style),
            Span::styled(label, status_style),
            separator(),
        ];

        match &self.session.device {
            Some(device) => {
                spans.push(Span::styled(
                    device.name.clone(),
                    Style::default()
                        .fg(palette::TEXT_BRIGHT)
                        .add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::styled(
                    format!(" ({})", device.address()),
                    styles::text_secondary(),
                ));
                spans.push(separator());
                spans.push(Span::styled(
                    device.device_type.as_deref().unwrap_or("unknown").to_string(),
                    styles::accent(),
                ));
                spans.push(separator());
                spans.push(Span::styled(
                    format!("user {}", device.username_or_default()),
                    styles::text_secondary(),
                ));
            }
            None => spans.push(Span::styled(
                format!("device {}", self.session.device_id),
                styles::text_secondary(),
            )),
        }

        spans
    }
}

impl Widget for DeviceHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false)
            .title(Span::styled(" netbak-term ", styles::accent_bold()))
            .style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        Paragraph::new(Line::from(self.spans())).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{connected_state, TestTerminal};
    use netbak_app::AppState;

    #[test]
    fn test_header_before_handshake() {
        let state = AppState::new(12);
        let mut term = TestTerminal::new();
        term.render_widget(DeviceHeader::new(&state.session), Rect::new(0, 0, 80, 3));
        assert!(term.buffer_contains("Connecting"));
        assert!(term.buffer_contains("device 12"));
    }

    #[test]
    fn test_header_shows_device_info() {
        let state = connected_state();
        let mut term = TestTerminal::new();
        term.render_widget(DeviceHeader::new(&state.session), Rect::new(0, 0, 80, 3));
        assert!(term.buffer_contains("1F_jieru"));
        assert!(term.buffer_contains("192.0.2.10:22"));
        assert!(term.buffer_contains("h3c"));
        assert!(term.buffer_contains("Connected"));
    }
}
