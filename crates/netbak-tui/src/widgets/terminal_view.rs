//! Terminal view: transcript plus the live input line
//!
//! Lines are soft-wrapped to the view width so scroll offsets count screen
//! rows. The live line (`prompt + buffer` with a block cursor) is rendered
//! after the transcript and is never stored in it.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget},
};
use unicode_width::UnicodeWidthChar;

use netbak_app::{ScrollState, SessionStatus, TerminalSession};

use super::status_bar::spinner;
use crate::theme::{palette, styles};

const TAB_STOP: &str = "    ";

/// Split `text` into rows no wider than `width` display columns.
///
/// Always returns at least one row; `width == 0` disables wrapping.
pub fn wrap_line(text: &str, width: usize) -> Vec<String> {
    let text = text.replace('\t', TAB_STOP);
    if width == 0 {
        return vec![text];
    }

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if current_width + w > width && !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(c);
        current_width += w;
    }
    rows.push(current);
    rows
}

/// Wrap per-character styled cells, merging runs of equal style into spans
fn wrap_cells(cells: &[(char, Style)], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    let mut row_width = 0;

    for &(c, style) in cells {
        let w = c.width().unwrap_or(0);
        if width > 0 && row_width + w > width && row_width > 0 {
            if !run.is_empty() {
                spans.push(Span::styled(std::mem::take(&mut run), run_style));
            }
            lines.push(Line::from(std::mem::take(&mut spans)));
            row_width = 0;
        }
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(c);
        row_width += w;
    }

    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    lines.push(Line::from(spans));
    lines
}

/// Scrollable terminal widget
pub struct TerminalView<'a> {
    session: &'a TerminalSession,
    spinner_frame: usize,
}

impl<'a> TerminalView<'a> {
    pub fn new(session: &'a TerminalSession) -> Self {
        Self {
            session,
            spinner_frame: 0,
        }
    }

    pub fn spinner_frame(mut self, frame: usize) -> Self {
        self.spinner_frame = frame;
        self
    }

    /// Live input line cells: prompt, buffer, and the cursor cell
    fn live_cells(&self) -> Vec<(char, Style)> {
        let prompt_style = styles::prompt();
        let text_style = styles::text_primary();
        let cursor_style = styles::cursor();

        let mut cells: Vec<(char, Style)> = self
            .session
            .prompt_text()
            .chars()
            .map(|c| (c, prompt_style))
            .collect();

        let buffer = &self.session.buffer;
        cells.extend(buffer.before_cursor().chars().map(|c| (c, text_style)));

        let after_text = buffer.after_cursor();
        let mut after = after_text.chars();
        // The cursor sits on the char under it, or on a trailing blank cell
        cells.push((after.next().unwrap_or(' '), cursor_style));
        cells.extend(after.map(|c| (c, text_style)));
        cells
    }

    fn rows(&self, width: usize) -> Vec<Line<'static>> {
        let mut rows: Vec<Line<'static>> = Vec::new();

        for line in self.session.transcript.lines() {
            let style = styles::line_style(line.kind);
            for chunk in wrap_line(&line.text, width) {
                rows.push(Line::styled(chunk, style));
            }
        }

        match self.session.status() {
            SessionStatus::Ready => rows.extend(wrap_cells(&self.live_cells(), width)),
            SessionStatus::Executing => rows.push(Line::styled(
                format!("{} ", spinner(self.spinner_frame)),
                Style::default().fg(palette::STATUS_YELLOW),
            )),
            SessionStatus::Connecting => rows.push(Line::styled(
                format!("{} ", spinner(self.spinner_frame)),
                styles::text_muted(),
            )),
            SessionStatus::Failed | SessionStatus::Disconnected => {}
        }

        rows
    }
}

impl StatefulWidget for TerminalView<'_> {
    type State = ScrollState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ScrollState) {
        let block = styles::glass_block(self.session.is_connected())
            .style(Style::default().bg(palette::DEEPEST_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let height = inner.height as usize;
        let rows = self.rows(inner.width as usize);

        state.page_size = height;
        state.content_rows = rows.len();
        let max_offset = rows.len().saturating_sub(height);
        if state.offset > max_offset {
            state.offset = max_offset;
        }

        let end = rows.len() - state.offset;
        let start = end.saturating_sub(height);
        let visible: Vec<Line<'static>> = rows[start..end].to_vec();

        Paragraph::new(visible).render(inner, buf);
    }
}
