//! Escape sequence handling and cosmetic cleanup of device output
//!
//! Devices reached through the backend's SSH channel return raw terminal
//! output: color codes, cursor movement from the pager (`ESC[16D` on
//! Comware), `---- More ----` markers, and the indentation the pager leaves
//! behind when it redraws a line. None of that is meaningful in a transcript.

use regex::Regex;
use std::sync::LazyLock;

/// Lines indented by at least this many whitespace chars are pager redraws.
pub const PAGER_INDENT_THRESHOLD: usize = 8;

/// Longest run of blank lines kept in sanitized output.
pub const MAX_BLANK_RUN: usize = 2;

/// Regex pattern for ANSI escape sequences.
///
/// Covers:
/// - CSI sequences: ESC [ ... letter (colors, cursor, etc.)
/// - OSC sequences: ESC ] ... BEL or ST (hyperlinks, titles)
/// - Simple escapes: ESC letter
/// - Caret notation: ^[ ... (some backends escape the ESC byte this way)
static ANSI_ESCAPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        # Standard ANSI with ESC byte (0x1B)
        \x1b\[[0-9;?]*[A-Za-z]           # CSI sequences
        | \x1b\][^\x07\x1b]*(?:\x07|\x1b\\)  # OSC sequences
        | \x1b[A-Za-z]                   # Simple escapes

        # Caret notation (^[ = ESC)
        | \^[\[]\[[0-9;?]*[A-Za-z]       # ^[[ CSI sequences
        | \^\[[0-9;?]*[A-Za-z]           # ^[ CSI sequences
        ",
    )
    .expect("ANSI regex pattern is valid")
});

/// Cursor-back sequences that lost their ESC byte on the way (`[16D`).
static ORPHAN_CURSOR_BACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\d+D").expect("cursor-back regex pattern is valid"));

/// Pager continuation markers: `---- More ----`, `--More--`, `<--- More --->`.
static MORE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<?-{2,}\s*more\s*-{2,}>?").expect("more-marker regex pattern is valid")
});

/// Strip all ANSI escape sequences from a string.
///
/// # Examples
///
/// ```
/// use netbak_core::strip_ansi_codes;
///
/// let input = "\x1b[31mred text\x1b[0m";
/// assert_eq!(strip_ansi_codes(input), "red text");
/// ```
pub fn strip_ansi_codes(input: &str) -> String {
    ANSI_ESCAPE_PATTERN.replace_all(input, "").into_owned()
}

/// Check if a string contains ANSI escape sequences.
pub fn contains_ansi_codes(input: &str) -> bool {
    ANSI_ESCAPE_PATTERN.is_match(input)
}

/// Clean device output for display.
///
/// Purely cosmetic; no attempt is made to understand the content:
/// 1. escape sequences and orphaned pager cursor moves are removed
/// 2. pager `More` markers are removed
/// 3. carriage returns are dropped
/// 4. lines indented by [`PAGER_INDENT_THRESHOLD`]+ whitespace lose the indent
/// 5. whitespace-only lines become empty, trailing spaces are trimmed
/// 6. runs of 3+ blank lines shrink to [`MAX_BLANK_RUN`]
/// 7. the whole text is trimmed
///
/// # Examples
///
/// ```
/// use netbak_core::sanitize_output;
///
/// let raw = "  ---- More ----\x1b[16D                \x1b[16D interface GE1/0/2\r\n";
/// assert_eq!(sanitize_output(raw), "interface GE1/0/2");
/// ```
pub fn sanitize_output(raw: &str) -> String {
    let text = if contains_ansi_codes(raw) {
        strip_ansi_codes(raw)
    } else {
        raw.to_string()
    };
    let text = ORPHAN_CURSOR_BACK.replace_all(&text, "");
    let text = MORE_MARKER.replace_all(&text, "");
    let text = text.replace('\r', "");

    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0usize;

    for line in text.split('\n') {
        let leading = line.len() - line.trim_start().len();
        let line = if leading >= PAGER_INDENT_THRESHOLD {
            line.trim_start()
        } else {
            line
        };
        let line = line.trim_end();

        if line.is_empty() {
            blank_run += 1;
            if blank_run > MAX_BLANK_RUN {
                continue;
            }
        } else {
            blank_run = 0;
        }
        lines.push(line);
    }

    lines.join("\n").trim().to_string()
}
