//! Message types for the application (TEA pattern)

use netbak_core::DeviceRecord;

use crate::input_key::InputKey;
use crate::session::CommandResult;

/// All events that drive state changes
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard input, converted at the front-end boundary
    Key(InputKey),

    /// Periodic tick for the busy spinner
    Tick,

    // ─────────────────────────────────────────────────────────
    // Connection lifecycle
    // ─────────────────────────────────────────────────────────
    /// Start the handshake (sent once at startup)
    Connect,
    /// Handshake returned the device record
    Connected { device: DeviceRecord },
    /// Handshake failed
    ConnectFailed { reason: String },
    /// Ctrl+D: close the backend session but keep the window
    Disconnect,
    /// Close the terminal, tearing down the session if connected
    Quit,

    // ─────────────────────────────────────────────────────────
    // Line editing
    // ─────────────────────────────────────────────────────────
    InsertChar(char),
    DeleteBackward,
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    HistoryPrev,
    HistoryNext,
    /// Tab completion against the configured keywords
    Complete,
    /// Load quick command `index` (F1 = 0)
    LoadQuickCommand(usize),

    // ─────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────
    /// Enter: submit the buffer
    Submit,
    /// Submit a whole line without touching the buffer (headless input)
    SubmitLine(String),
    /// Result of the request identified by `request_id`
    CommandFinished {
        request_id: u64,
        result: CommandResult,
    },
    /// Ctrl+C while a command is in flight
    CancelCommand,

    // ─────────────────────────────────────────────────────────
    // View
    // ─────────────────────────────────────────────────────────
    ClearTranscript,
    PageUp,
    PageDown,
    ScrollToBottom,
}
