//! Headless mode - NDJSON event output instead of the TUI
//!
//! Commands are read from stdin, one per line, and run one at a time. Every
//! session event is written to stdout as one JSON object per line, so scripts
//! can drive a device without parsing terminal escape codes.
//!
//! # Example Output
//!
//! ```json
//! {"event":"connected","device_id":3,"name":"1F_jieru","address":"10.1.1.3:22","timestamp":1704700001000}
//! {"event":"command_sent","request_id":1,"command":"display clock","timestamp":1704700002000}
//! {"event":"output","kind":"output","text":"10:00:00 UTC","timestamp":1704700002300}
//! {"event":"disconnected","timestamp":1704700003000}
//! ```

pub mod runner;

use chrono::Utc;
use serde::Serialize;
use std::io::{self, Write};
use tracing::error;

use netbak_app::{EngineEvent, LineKind, TranscriptLine};
use netbak_core::{DeviceRecord, PromptState};

pub use runner::run_headless;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Handshake succeeded
    Connected {
        device_id: u64,
        name: String,
        address: String,
        device_type: Option<String>,
        timestamp: i64,
    },

    /// Handshake failed
    ConnectionFailed { reason: String, timestamp: i64 },

    /// A command line was sent to the device
    CommandSent {
        request_id: u64,
        command: String,
        timestamp: i64,
    },

    /// One transcript line (device output, banner or notice)
    Output {
        kind: LineKind,
        text: String,
        timestamp: i64,
    },

    /// One error line
    Error { message: String, timestamp: i64 },

    /// The inferred CLI prompt changed
    PromptChanged {
        prompt: String,
        state: PromptState,
        timestamp: i64,
    },

    /// The session was closed
    Disconnected { timestamp: i64 },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // NDJSON: one object per line, flushed immediately
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn connected(device: &DeviceRecord) -> Self {
        Self::Connected {
            device_id: device.id,
            name: device.name.clone(),
            address: format!("{}:{}", device.ip_address, device.port),
            device_type: device.device_type.clone(),
            timestamp: Self::now(),
        }
    }

    pub fn connection_failed(reason: &str) -> Self {
        Self::ConnectionFailed {
            reason: reason.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn command_sent(request_id: u64, command: &str) -> Self {
        Self::CommandSent {
            request_id,
            command: command.to_string(),
            timestamp: Self::now(),
        }
    }

    /// Map a transcript line. Echo lines are covered by `command_sent`.
    pub fn line(line: &TranscriptLine) -> Option<Self> {
        match line.kind {
            LineKind::Echo => None,
            LineKind::Error => Some(Self::Error {
                message: line.text.clone(),
                timestamp: Self::now(),
            }),
            kind => Some(Self::Output {
                kind,
                text: line.text.clone(),
                timestamp: Self::now(),
            }),
        }
    }

    pub fn prompt_changed(prompt: &str, state: PromptState) -> Self {
        Self::PromptChanged {
            prompt: prompt.to_string(),
            state,
            timestamp: Self::now(),
        }
    }

    pub fn disconnected() -> Self {
        Self::Disconnected {
            timestamp: Self::now(),
        }
    }

    /// Convert an engine event into the headless events it produces
    pub fn from_engine_event(event: &EngineEvent) -> Vec<Self> {
        match event {
            EngineEvent::Connected { device } => vec![Self::connected(device)],
            EngineEvent::ConnectionFailed { reason } => vec![Self::connection_failed(reason)],
            EngineEvent::CommandSent {
                request_id,
                command,
            } => vec![Self::command_sent(*request_id, command)],
            EngineEvent::Lines { lines } => lines.iter().filter_map(Self::line).collect(),
            EngineEvent::PromptChanged { prompt, state } => {
                vec![Self::prompt_changed(prompt, *state)]
            }
            EngineEvent::Disconnected => vec![Self::disconnected()],
            EngineEvent::StatusChanged { .. } | EngineEvent::Shutdown => Vec::new(),
        }
    }
}
