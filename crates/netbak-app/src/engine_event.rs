//! Domain events emitted by the Engine for non-TUI consumers
//!
//! Broadcast after each message processing cycle via `Engine::subscribe()`.
//! The headless runner turns these into NDJSON.

use netbak_core::{DeviceRecord, PromptState};

use crate::session::SessionStatus;
use crate::transcript::TranscriptLine;

#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// The session phase changed
    StatusChanged {
        old: SessionStatus,
        new: SessionStatus,
    },

    /// Handshake completed
    Connected { device: DeviceRecord },

    /// Handshake failed
    ConnectionFailed { reason: String },

    /// A command was accepted and sent
    CommandSent { request_id: u64, command: String },

    /// New transcript lines, in order
    Lines { lines: Vec<TranscriptLine> },

    /// The rendered prompt changed
    PromptChanged { prompt: String, state: PromptState },

    /// The session was closed
    Disconnected,

    /// The engine is shutting down
    Shutdown,
}
