//! Semantic style builders

use netbak_app::{LineKind, SessionStatus};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Function-key labels in the quick-command bar and key hints
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// Prompt text before the input line and in echoed commands
pub fn prompt() -> Style {
    Style::default()
        .fg(palette::PROMPT)
        .add_modifier(Modifier::BOLD)
}

/// Block cursor in the live input line
pub fn cursor() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::CURSOR_BG)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

/// Style for a transcript line
pub fn line_style(kind: LineKind) -> Style {
    match kind {
        LineKind::Banner => Style::default().fg(palette::STATUS_BLUE),
        LineKind::Echo => Style::default().fg(palette::TEXT_BRIGHT),
        LineKind::Output => Style::default().fg(palette::OUTPUT),
        LineKind::Error => Style::default().fg(palette::ERROR),
        LineKind::Notice => Style::default()
            .fg(palette::STATUS_YELLOW)
            .add_modifier(Modifier::ITALIC),
    }
}

/// Connection indicator: `(icon, label, style)`
pub fn status_indicator(status: SessionStatus) -> (&'static str, &'static str, Style) {
    let label = status.label();
    match status {
        SessionStatus::Ready => (
            "●",
            label,
            Style::default()
                .fg(palette::STATUS_GREEN)
                .add_modifier(Modifier::BOLD),
        ),
        SessionStatus::Executing => (
            "↻",
            label,
            Style::default()
                .fg(palette::STATUS_YELLOW)
                .add_modifier(Modifier::BOLD),
        ),
        SessionStatus::Connecting => ("○", label, Style::default().fg(palette::STATUS_YELLOW)),
        SessionStatus::Failed => ("✗", label, Style::default().fg(palette::STATUS_RED)),
        SessionStatus::Disconnected => ("○", label, Style::default().fg(palette::TEXT_MUTED)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_styles_have_correct_colors() {
        assert_eq!(text_primary().fg, Some(palette::TEXT_PRIMARY));
        assert_eq!(text_secondary().fg, Some(palette::TEXT_SECONDARY));
        assert_eq!(text_muted().fg, Some(palette::TEXT_MUTED));
    }

    #[test]
    fn test_error_lines_are_red() {
        assert_eq!(line_style(LineKind::Error).fg, Some(palette::ERROR));
        assert_ne!(line_style(LineKind::Output), line_style(LineKind::Error));
    }

    #[test]
    fn test_status_indicator_labels() {
        assert_eq!(status_indicator(SessionStatus::Ready).1, "Connected");
        assert_eq!(status_indicator(SessionStatus::Failed).0, "✗");
        assert!(status_indicator(SessionStatus::Executing)
            .2
            .add_modifier
            .contains(Modifier::BOLD));
    }
}
