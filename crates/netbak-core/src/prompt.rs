//! Best-effort prompt detection in free-text device output
//!
//! Network operating systems print their prompt after every command, and the
//! shape of that prompt tells us which view the session is in:
//!
//! | Output token      | Vendor              | Mode        |
//! |-------------------|---------------------|-------------|
//! | `<host>`          | H3C, HP, Huawei     | user        |
//! | `[host]`          | H3C, HP, Huawei     | system      |
//! | `user@host>`      | Cisco-like          | user        |
//! | `user@host#`      | Cisco-like          | privileged  |
//!
//! Detection is a heuristic over vendor free text. False positives and
//! negatives are expected; callers treat the result as an annotation only.

use regex::Regex;
use std::sync::LazyLock;

use crate::ansi::strip_ansi_codes;
use crate::types::PromptState;

/// `<token>` at column 0 of a line
static ANGLE_PROMPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^<([A-Za-z0-9_.\-]+)>").expect("angle prompt regex is valid")
});

/// `[token]` at column 0 of a line
static SQUARE_PROMPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\[([A-Za-z0-9_.\-~]+)\]").expect("square prompt regex is valid")
});

/// `user@host#` or `user@host>` at column 0 of a line
static USER_HOST_PROMPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[A-Za-z0-9_.\-]+@([A-Za-z0-9_.\-]+)([#>])")
        .expect("user@host prompt regex is valid")
});

/// Comware banner printed by `system-view`
static SYSTEM_VIEW_BANNER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"System View:").expect("system view regex is valid"));

/// A full line that is nothing but a prompt
static BARE_PROMPT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^\s*(?:
            <[A-Za-z0-9_.\-]+>
          | \[[A-Za-z0-9_.\-~]+\]
          | [A-Za-z0-9_.\-]+@[A-Za-z0-9_.\-]+[\#>]
        )\s*$",
    )
    .expect("bare prompt regex is valid")
});

/// A prompt token found in device output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptMatch {
    /// Captured hostname token, if the pattern carries one
    pub hostname: Option<String>,
    /// Mode implied by the pattern
    pub state: PromptState,
}

/// Scan device output for the most recent prompt.
///
/// Escape sequences are stripped first so colored prompts still match. When
/// several prompts appear, the last one wins since it reflects the mode the
/// device was left in. Returns `None` when nothing recognizable is present.
pub fn infer_prompt(raw_output: &str) -> Option<PromptMatch> {
    if raw_output.is_empty() {
        return None;
    }
    let text = strip_ansi_codes(raw_output);

    let mut best: Option<(usize, PromptMatch)> = None;
    let mut consider = |pos: usize, found: PromptMatch| {
        if best.as_ref().is_none_or(|(p, _)| pos >= *p) {
            best = Some((pos, found));
        }
    };

    if let Some(caps) = ANGLE_PROMPT.captures_iter(&text).last() {
        if let Some(host) = caps.get(1) {
            consider(
                host.start(),
                PromptMatch {
                    hostname: Some(host.as_str().to_string()),
                    state: PromptState::User,
                },
            );
        }
    }

    if let Some(caps) = SQUARE_PROMPT.captures_iter(&text).last() {
        if let Some(host) = caps.get(1) {
            consider(
                host.start(),
                PromptMatch {
                    hostname: Some(host.as_str().to_string()),
                    state: PromptState::Privileged,
                },
            );
        }
    }

    if let Some(caps) = USER_HOST_PROMPT.captures_iter(&text).last() {
        if let (Some(host), Some(mark)) = (caps.get(1), caps.get(2)) {
            let state = if mark.as_str() == "#" {
                PromptState::Privileged
            } else {
                PromptState::User
            };
            consider(
                host.start(),
                PromptMatch {
                    hostname: Some(host.as_str().to_string()),
                    state,
                },
            );
        }
    }

    if let Some(m) = SYSTEM_VIEW_BANNER.find_iter(&text).last() {
        consider(
            m.start(),
            PromptMatch {
                hostname: None,
                state: PromptState::Privileged,
            },
        );
    }

    best.map(|(_, found)| found)
}

/// Whether a single line consists only of a device prompt.
pub fn is_bare_prompt_line(line: &str) -> bool {
    BARE_PROMPT_LINE.is_match(line)
}
