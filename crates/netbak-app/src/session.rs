//! Terminal session state machine
//!
//! One [`TerminalSession`] per device connection. All transitions happen
//! here; the handler only decides which transition a message maps to and
//! which [`crate::UpdateAction`] follows from it.

use chrono::{DateTime, Local};

use netbak_client::CommandOutcome;
use netbak_core::{
    infer_prompt, is_bare_prompt_line, sanitize_output, DeviceId, DeviceRecord, PromptContext,
};

use crate::completion;
use crate::history::HistoryRing;
use crate::line_buffer::LineBuffer;
use crate::transcript::{LineKind, Transcript};

/// Text shown after a cancelled command
pub const INTERRUPTED_NOTICE: &str = "Command interrupted";

/// Lifecycle of a session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Handshake in flight
    #[default]
    Connecting,
    /// Accepting input
    Ready,
    /// One command in flight; input frozen except Ctrl+C
    Executing { request_id: u64, command: String },
    /// Handshake failed; only closing is possible
    Failed { reason: String },
    /// Closed by the user
    Disconnected,
}

/// Data-less view of [`SessionPhase`] for change detection and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionStatus {
    Connecting,
    Ready,
    Executing,
    Failed,
    Disconnected,
}

impl SessionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::Connecting => "Connecting",
            SessionStatus::Ready => "Connected",
            SessionStatus::Executing => "Executing",
            SessionStatus::Failed => "Failed",
            SessionStatus::Disconnected => "Disconnected",
        }
    }
}

impl SessionPhase {
    pub fn status(&self) -> SessionStatus {
        match self {
            SessionPhase::Connecting => SessionStatus::Connecting,
            SessionPhase::Ready => SessionStatus::Ready,
            SessionPhase::Executing { .. } => SessionStatus::Executing,
            SessionPhase::Failed { .. } => SessionStatus::Failed,
            SessionPhase::Disconnected => SessionStatus::Disconnected,
        }
    }
}

/// A command accepted for execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub request_id: u64,
    pub command: String,
}

/// Result of a command request as delivered back to the session.
///
/// `Err` carries the display form of a transport or backend failure.
pub type CommandResult = std::result::Result<CommandOutcome, String>;

/// Per-device terminal state
#[derive(Debug, Clone)]
pub struct TerminalSession {
    pub device_id: DeviceId,
    /// Filled in by the handshake
    pub device: Option<DeviceRecord>,
    pub phase: SessionPhase,
    pub prompt: PromptContext,
    pub buffer: LineBuffer,
    pub history: HistoryRing,
    pub transcript: Transcript,
    /// When the handshake succeeded
    pub connected_at: Option<DateTime<Local>>,
    next_request_id: u64,
}

impl TerminalSession {
    pub fn new(device_id: DeviceId) -> Self {
        Self {
            device_id,
            device: None,
            phase: SessionPhase::Connecting,
            prompt: PromptContext::default(),
            buffer: LineBuffer::new(),
            history: HistoryRing::new(),
            transcript: Transcript::new(),
            connected_at: None,
            next_request_id: 1,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.phase.status()
    }

    /// `Ready` or `Executing`: the backend holds an SSH session for us
    pub fn is_connected(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Ready | SessionPhase::Executing { .. }
        )
    }

    pub fn is_ready(&self) -> bool {
        self.phase == SessionPhase::Ready
    }

    pub fn is_executing(&self) -> bool {
        matches!(self.phase, SessionPhase::Executing { .. })
    }

    /// Current prompt text
    pub fn prompt_text(&self) -> String {
        self.prompt.render()
    }

    // ─────────────────────────────────────────────────────────
    // Connection lifecycle
    // ─────────────────────────────────────────────────────────

    /// Announce the handshake. Only meaningful while `Connecting`.
    pub fn begin_connect(&mut self) -> bool {
        if self.phase != SessionPhase::Connecting {
            return false;
        }
        self.transcript.push(
            LineKind::Banner,
            format!("Connecting to device {}...", self.device_id),
        );
        true
    }

    /// Handshake succeeded
    pub fn on_connected(&mut self, device: DeviceRecord, show_banner: bool, now: DateTime<Local>) {
        if self.phase != SessionPhase::Connecting {
            return;
        }

        self.transcript.push(
            LineKind::Banner,
            format!("Connected to {} ({})", device.name, device.address()),
        );
        self.transcript
            .push(LineKind::Banner, "SSH connection established");
        if show_banner {
            self.transcript.push(LineKind::Banner, "");
            self.transcript.push(
                LineKind::Banner,
                format!(
                    "Device type: {}  User: {}",
                    device.device_type.as_deref().unwrap_or("unknown"),
                    device.username_or_default()
                ),
            );
            if let Some(description) = device.description.as_deref().filter(|d| !d.is_empty()) {
                self.transcript.push(LineKind::Banner, description);
            }
            self.transcript.push(
                LineKind::Banner,
                format!("Last login: {}", now.format("%Y-%m-%d %H:%M:%S")),
            );
            self.transcript.push(LineKind::Banner, "");
        }

        self.prompt = PromptContext::for_device(&device);
        self.device = Some(device);
        self.connected_at = Some(now);
        self.phase = SessionPhase::Ready;
    }

    /// Handshake failed
    pub fn on_connect_failed(&mut self, reason: &str) {
        if self.phase != SessionPhase::Connecting {
            return;
        }
        self.transcript
            .push(LineKind::Error, format!("Connection failed: {}", reason));
        self.transcript
            .push(LineKind::Notice, "Please check the network connection.");
        self.phase = SessionPhase::Failed {
            reason: reason.to_string(),
        };
    }

    /// Close the session. Returns `true` if the backend should be told to
    /// tear down its SSH session (i.e. we were connected).
    pub fn disconnect(&mut self) -> bool {
        if !self.is_connected() {
            return false;
        }
        self.transcript.push(LineKind::Notice, "Connection closed.");
        self.buffer.clear();
        self.history.reset_browse();
        self.phase = SessionPhase::Disconnected;
        true
    }

    // ─────────────────────────────────────────────────────────
    // Line editing (Ready only)
    // ─────────────────────────────────────────────────────────

    pub fn insert_char(&mut self, c: char) -> bool {
        if !self.is_ready() || c.is_control() {
            return false;
        }
        self.buffer.insert(c);
        true
    }

    pub fn delete_backward(&mut self) -> bool {
        self.is_ready() && self.buffer.backspace()
    }

    pub fn delete_forward(&mut self) -> bool {
        self.is_ready() && self.buffer.delete()
    }

    pub fn cursor_left(&mut self) {
        if self.is_ready() {
            self.buffer.move_left();
        }
    }

    pub fn cursor_right(&mut self) {
        if self.is_ready() {
            self.buffer.move_right();
        }
    }

    pub fn cursor_home(&mut self) {
        if self.is_ready() {
            self.buffer.move_home();
        }
    }

    pub fn cursor_end(&mut self) {
        if self.is_ready() {
            self.buffer.move_end();
        }
    }

    /// Show the next older history entry
    pub fn history_prev(&mut self) {
        if !self.is_ready() {
            return;
        }
        if let Some(entry) = self.history.up() {
            let entry = entry.to_string();
            self.buffer.set(&entry);
        }
    }

    /// Show the next newer history entry, or clear past the newest
    pub fn history_next(&mut self) {
        if !self.is_ready() {
            return;
        }
        if let Some(entry) = self.history.down() {
            let entry = entry.to_string();
            self.buffer.set(&entry);
        }
    }

    /// Tab completion. Returns `true` if the buffer changed.
    pub fn complete(&mut self, keywords: &[String]) -> bool {
        if !self.is_ready() {
            return false;
        }
        let current = self.buffer.as_string();
        match completion::complete(&current, keywords) {
            Some(word) => {
                self.buffer.set(word);
                true
            }
            None => false,
        }
    }

    /// Put a preset into the buffer with the cursor at its end
    pub fn load_command(&mut self, command: &str) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.buffer.set(command);
        self.history.reset_browse();
        true
    }

    // ─────────────────────────────────────────────────────────
    // Command execution
    // ─────────────────────────────────────────────────────────

    /// Submit the buffer. Returns the accepted command, or `None` when not
    /// `Ready` or the buffer is blank.
    pub fn submit(&mut self) -> Option<Submission> {
        if !self.is_ready() {
            return None;
        }
        let command = self.buffer.as_string().trim().to_string();
        if command.is_empty() {
            return None;
        }
        Some(self.start_command(command))
    }

    /// Submit `line` directly, bypassing the buffer. Used by the headless
    /// runner. Same gating as [`Self::submit`].
    pub fn submit_line(&mut self, line: &str) -> Option<Submission> {
        if !self.is_ready() {
            return None;
        }
        let command = line.trim().to_string();
        if command.is_empty() {
            return None;
        }
        Some(self.start_command(command))
    }

    fn start_command(&mut self, command: String) -> Submission {
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        self.history.push(command.clone());
        self.transcript
            .push(LineKind::Echo, format!("{}{}", self.prompt.render(), command));
        self.buffer.clear();
        self.phase = SessionPhase::Executing {
            request_id,
            command: command.clone(),
        };

        Submission {
            request_id,
            command,
        }
    }

    /// Deliver a command result.
    ///
    /// Returns `false` (and changes nothing) if `request_id` is not the
    /// command currently executing, e.g. one that was cancelled.
    pub fn on_command_result(&mut self, request_id: u64, result: CommandResult) -> bool {
        match &self.phase {
            SessionPhase::Executing { request_id: id, .. } if *id == request_id => {}
            _ => return false,
        }

        match result {
            Ok(CommandOutcome::Completed { output, error }) => {
                if let Some(raw) = output.as_deref() {
                    if let Some(found) = infer_prompt(raw) {
                        self.prompt.apply(&found);
                    }
                    let cleaned = clean_output(raw);
                    if !cleaned.is_empty() {
                        self.transcript.push_text(LineKind::Output, &cleaned);
                    }
                }
                if let Some(error) = error {
                    self.transcript
                        .push(LineKind::Error, format!("Error: {}", error));
                }
            }
            Ok(CommandOutcome::Rejected { message }) => {
                self.transcript
                    .push(LineKind::Error, format!("Error: {}", message));
            }
            Err(reason) => {
                self.transcript
                    .push(LineKind::Error, format!("Error: {}", reason));
            }
        }

        self.phase = SessionPhase::Ready;
        true
    }

    /// Ctrl+C while executing: abandon the in-flight command locally.
    ///
    /// The transcript gets `^C`, the interrupted notice and a fresh prompt
    /// line, so transcript consumers see the session handed back.
    pub fn cancel(&mut self) -> bool {
        if !self.is_executing() {
            return false;
        }
        self.transcript.push(LineKind::Echo, "^C");
        self.transcript.push(LineKind::Notice, INTERRUPTED_NOTICE);
        self.transcript.push(LineKind::Echo, self.prompt.render());
        self.buffer.clear();
        self.phase = SessionPhase::Ready;
        true
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }
}

/// Sanitize raw output and drop a trailing prompt-only line, which the live
/// input line already shows.
fn clean_output(raw: &str) -> String {
    let sanitized = sanitize_output(raw);
    let mut lines: Vec<&str> = sanitized.lines().collect();
    if lines.last().is_some_and(|l| is_bare_prompt_line(l)) {
        lines.pop();
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use netbak_client::test_utils::{test_device, test_device_with_type};
    use netbak_core::PromptState;

    fn now() -> DateTime<Local> {
        Local::now()
    }

    fn ready_session() -> TerminalSession {
        let mut s = TerminalSession::new(1);
        s.begin_connect();
        s.on_connected(test_device(1, "1F_jieru"), true, now());
        s
    }

    fn type_text(s: &mut TerminalSession, text: &str) {
        for c in text.chars() {
            s.insert_char(c);
        }
    }

    fn completed(output: &str) -> CommandResult {
        Ok(CommandOutcome::Completed {
            output: Some(output.to_string()),
            error: None,
        })
    }

    #[test]
    fn test_starts_connecting() {
        let s = TerminalSession::new(4);
        assert_eq!(s.status(), SessionStatus::Connecting);
        assert!(!s.is_connected());
    }

    #[test]
    fn test_connect_banner_and_prompt() {
        let s = ready_session();
        assert!(s.is_ready());
        assert_eq!(s.prompt_text(), "<admin>");
        let texts: Vec<_> = s.transcript.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts[0], "Connecting to device 1...");
        assert!(texts.contains(&"SSH connection established"));
        assert!(texts.iter().any(|t| t.starts_with("Last login: ")));
    }

    #[test]
    fn test_connect_without_banner() {
        let mut s = TerminalSession::new(1);
        s.on_connected(test_device(1, "sw"), false, now());
        assert_eq!(s.transcript.len(), 2);
        assert!(!s.transcript.lines().iter().any(|l| l.text.starts_with("Last login")));
    }

    #[test]
    fn test_connect_failure() {
        let mut s = TerminalSession::new(1);
        s.begin_connect();
        s.on_connect_failed("Device not found: 1");
        assert_eq!(
            s.phase,
            SessionPhase::Failed {
                reason: "Device not found: 1".to_string()
            }
        );
        let texts: Vec<_> = s.transcript.lines().iter().map(|l| l.text.as_str()).collect();
        assert!(texts.contains(&"Connection failed: Device not found: 1"));
        assert!(texts.contains(&"Please check the network connection."));

        // Failed sessions ignore input and have nothing to tear down
        assert!(!s.insert_char('a'));
        assert!(s.submit().is_none());
        assert!(!s.disconnect());
    }

    #[test]
    fn test_submit_echoes_and_executes() {
        let mut s = ready_session();
        let before = s.transcript.len();
        type_text(&mut s, "  display clock  ");

        let sub = s.submit().unwrap();
        assert_eq!(sub.command, "display clock");
        assert_eq!(s.history.entries(), &["display clock"]);
        assert!(s.buffer.is_empty());
        assert_eq!(s.transcript.len(), before + 1);
        assert_eq!(s.transcript.last().unwrap().text, "<admin>display clock");
        assert_eq!(s.transcript.last().unwrap().kind, LineKind::Echo);
        assert!(matches!(s.phase, SessionPhase::Executing { request_id, .. } if request_id == sub.request_id));
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut s = ready_session();
        let before = s.transcript.len();
        type_text(&mut s, "   ");
        assert!(s.submit().is_none());
        assert!(s.is_ready());
        assert!(s.history.is_empty());
        assert_eq!(s.transcript.len(), before);
    }

    #[test]
    fn test_executing_ignores_editing() {
        let mut s = ready_session();
        type_text(&mut s, "dis ver");
        s.submit().unwrap();

        assert!(!s.insert_char('x'));
        assert!(!s.delete_backward());
        s.history_prev();
        assert!(s.buffer.is_empty());
        assert!(s.submit().is_none());
        assert!(s.submit_line("display clock").is_none());
    }

    #[test]
    fn test_result_appends_output_and_infers_prompt() {
        let mut s = ready_session();
        type_text(&mut s, "system-view");
        let sub = s.submit().unwrap();

        let output = "System View: return to User View with Ctrl+Z.\n[1F_jieru]";
        assert!(s.on_command_result(sub.request_id, completed(output)));

        assert!(s.is_ready());
        assert_eq!(s.prompt.state, PromptState::Privileged);
        assert_eq!(s.prompt_text(), "[1F_jieru]");
        // The trailing bare prompt is not duplicated in the transcript
        assert_eq!(
            s.transcript.last().unwrap().text,
            "System View: return to User View with Ctrl+Z."
        );
    }

    #[test]
    fn test_result_with_secondary_error() {
        let mut s = ready_session();
        type_text(&mut s, "ping 10.0.0.1");
        let sub = s.submit().unwrap();
        s.on_command_result(
            sub.request_id,
            Ok(CommandOutcome::Completed {
                output: Some("Request time out".to_string()),
                error: Some("partial loss".to_string()),
            }),
        );
        let tail: Vec<_> = s.transcript.tail(2).iter().map(|l| l.text.clone()).collect();
        assert_eq!(tail, vec!["Request time out", "Error: partial loss"]);
    }

    #[test]
    fn test_failure_appends_exactly_one_error_line() {
        let mut s = ready_session();
        type_text(&mut s, "display version");
        let sub = s.submit().unwrap();
        let before = s.transcript.len();

        assert!(s.on_command_result(sub.request_id, Err("Request failed: timeout".to_string())));
        assert_eq!(s.transcript.len(), before + 1);
        let last = s.transcript.last().unwrap();
        assert_eq!(last.kind, LineKind::Error);
        assert_eq!(last.text, "Error: Request failed: timeout");
        assert!(s.is_ready());
        assert!(s.buffer.is_empty());
    }

    #[test]
    fn test_rejected_renders_message() {
        let mut s = ready_session();
        type_text(&mut s, "x");
        let sub = s.submit().unwrap();
        s.on_command_result(
            sub.request_id,
            Ok(CommandOutcome::Rejected {
                message: "SSH session closed".to_string(),
            }),
        );
        assert_eq!(s.transcript.last().unwrap().text, "Error: SSH session closed");
    }

    #[test]
    fn test_cancel_then_late_response_is_discarded() {
        let mut s = ready_session();
        type_text(&mut s, "display current-configuration");
        let sub = s.submit().unwrap();

        assert!(s.cancel());
        assert!(s.is_ready());
        let prompt = s.prompt.render();
        let tail: Vec<_> = s.transcript.tail(3).iter().map(|l| l.text.as_str()).collect();
        assert_eq!(tail, vec!["^C", INTERRUPTED_NOTICE, prompt.as_str()]);
        assert_eq!(s.transcript.last().map(|l| l.kind), Some(LineKind::Echo));

        let before = s.transcript.len();
        assert!(!s.on_command_result(sub.request_id, completed("late output")));
        assert_eq!(s.transcript.len(), before);
        assert!(s.is_ready());
    }

    #[test]
    fn test_stale_response_does_not_complete_new_command() {
        let mut s = ready_session();
        type_text(&mut s, "first");
        let first = s.submit().unwrap();
        s.cancel();
        type_text(&mut s, "second");
        let second = s.submit().unwrap();
        assert_ne!(first.request_id, second.request_id);

        assert!(!s.on_command_result(first.request_id, completed("old")));
        assert!(s.is_executing());
        assert!(s.on_command_result(second.request_id, completed("new")));
        assert_eq!(s.transcript.last().unwrap().text, "new");
    }

    #[test]
    fn test_cancel_when_ready_is_noop() {
        let mut s = ready_session();
        let before = s.transcript.len();
        assert!(!s.cancel());
        assert_eq!(s.transcript.len(), before);
    }

    #[test]
    fn test_history_browsing_through_session() {
        let mut s = ready_session();
        for cmd in ["a", "b"] {
            type_text(&mut s, cmd);
            let sub = s.submit().unwrap();
            s.on_command_result(sub.request_id, completed(""));
        }
        s.history_prev();
        assert_eq!(s.buffer.as_string(), "b");
        assert_eq!(s.buffer.cursor(), 1);
        s.history_prev();
        assert_eq!(s.buffer.as_string(), "a");
        s.history_prev();
        assert_eq!(s.buffer.as_string(), "a");
        s.history_next();
        s.history_next();
        assert!(s.buffer.is_empty());
    }

    #[test]
    fn test_completion() {
        let mut s = ready_session();
        let kw = vec!["display".to_string(), "ping".to_string()];
        type_text(&mut s, "Di");
        assert!(s.complete(&kw));
        assert_eq!(s.buffer.as_string(), "display");
        assert_eq!(s.buffer.cursor(), 7);
    }

    #[test]
    fn test_disconnect_from_ready() {
        let mut s = ready_session();
        type_text(&mut s, "half typed");
        assert!(s.disconnect());
        assert_eq!(s.phase, SessionPhase::Disconnected);
        assert!(s.buffer.is_empty());
        assert!(!s.disconnect());
    }

    #[test]
    fn test_cisco_prompt_after_enable() {
        let mut s = TerminalSession::new(2);
        s.on_connected(test_device_with_type(2, "edge", Some("cisco")), false, now());
        assert_eq!(s.prompt_text(), "admin@admin>");

        type_text(&mut s, "enable");
        let sub = s.submit().unwrap();
        s.on_command_result(sub.request_id, completed("admin@edge-rtr#"));
        assert_eq!(s.prompt_text(), "admin@edge-rtr#");
    }

    #[test]
    fn test_clean_output_strips_pager_and_prompt() {
        let raw = "\x1b[32mInterface  Status\x1b[0m\r\n  ---- More ----\x1b[16D                \x1b[16DGE1/0/1    UP\r\n\r\n<sw1>";
        let cleaned = clean_output(raw);
        assert!(cleaned.contains("Interface  Status"));
        assert!(cleaned.contains("GE1/0/1    UP"));
        assert!(!cleaned.contains("More"));
        assert!(!cleaned.ends_with("<sw1>"));
    }
}
