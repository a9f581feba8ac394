//! netbak-app - Terminal session state and orchestration for netbak-term
//!
//! Implements the TEA (The Elm Architecture) pattern: [`AppState`] is the
//! model, [`handler::update`] the update function, and [`UpdateAction`]s are
//! turned into background tasks against a [`netbak_client::CommandChannel`].
//! The [`Engine`] ties these together for both the TUI and headless runners.

pub mod actions;
pub mod completion;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod handler;
pub mod history;
pub mod input_key;
pub mod line_buffer;
pub mod message;
pub mod process;
pub mod session;
pub mod signals;
pub mod state;
pub mod transcript;

pub use config::{QuickCommand, Settings};
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use handler::{UpdateAction, UpdateResult};
pub use history::HistoryRing;
pub use input_key::InputKey;
pub use line_buffer::LineBuffer;
pub use message::Message;
pub use session::{SessionPhase, SessionStatus, TerminalSession};
pub use state::{AppPhase, AppState};
pub use transcript::{LineKind, ScrollState, Transcript, TranscriptLine};
