//! Session transcript: typed lines plus scroll bookkeeping

use serde::Serialize;

/// What produced a transcript line; drives styling and headless events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Connection banner
    Banner,
    /// Echo of a submitted command (`prompt + command`) or `^C`
    Echo,
    /// Sanitized device output
    Output,
    /// Per-command or connection error
    Error,
    /// Local notice (interrupts, disconnects)
    Notice,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptLine {
    pub kind: LineKind,
    pub text: String,
}

impl TranscriptLine {
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Append-only list of lines, cleared only on explicit request.
///
/// `appended` counts every line ever pushed and survives `clear()`, so
/// observers can tell how many lines arrived since they last looked.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<TranscriptLine>,
    appended: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn appended(&self) -> u64 {
        self.appended
    }

    pub fn last(&self) -> Option<&TranscriptLine> {
        self.lines.last()
    }

    /// Push a single line (embedded newlines are kept verbatim)
    pub fn push(&mut self, kind: LineKind, text: impl Into<String>) {
        self.lines.push(TranscriptLine::new(kind, text));
        self.appended += 1;
    }

    /// Push multi-line text, one transcript line per `\n`-separated line
    pub fn push_text(&mut self, kind: LineKind, text: &str) {
        for line in text.split('\n') {
            self.push(kind, line);
        }
    }

    /// The most recent `n` lines (fewer if the transcript is shorter)
    pub fn tail(&self, n: usize) -> &[TranscriptLine] {
        let start = self.lines.len().saturating_sub(n);
        &self.lines[start..]
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Scroll position of the transcript view.
///
/// `offset` counts rows scrolled up from the bottom; `0` means following the
/// newest output. The renderer records the viewport height in `page_size`
/// and the wrapped row count in `content_rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollState {
    pub offset: usize,
    pub page_size: usize,
    pub content_rows: usize,
    pub auto_follow: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0,
            page_size: 10,
            content_rows: 0,
            auto_follow: true,
        }
    }
}

impl ScrollState {
    /// Scroll toward older rows, clamped so the first row stays reachable.
    ///
    /// `total_lines` is the transcript length; the larger of it and the last
    /// rendered row count bounds the offset.
    pub fn page_up(&mut self, total_lines: usize) {
        let total = total_lines.max(self.content_rows);
        let max = total.saturating_sub(self.page_size);
        self.offset = (self.offset + self.page_size.max(1)).min(max);
        self.auto_follow = self.offset == 0;
    }

    pub fn page_down(&mut self) {
        self.offset = self.offset.saturating_sub(self.page_size.max(1));
        self.auto_follow = self.offset == 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = 0;
        self.auto_follow = true;
    }

    /// Called when lines are appended
    pub fn on_new_lines(&mut self) {
        if self.auto_follow {
            self.offset = 0;
        }
    }
}
