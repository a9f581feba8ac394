//! Key event handlers for each session phase

use crate::input_key::InputKey;
use crate::message::Message;
use crate::session::SessionStatus;
use crate::state::AppState;

/// Convert a key press to a message based on the session phase
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if let Some(msg) = handle_key_global(key) {
        return Some(msg);
    }

    // End jumps back to the live line while the view is scrolled up
    if matches!(key, InputKey::End) && !state.scroll.auto_follow {
        return Some(Message::ScrollToBottom);
    }

    match state.session.status() {
        SessionStatus::Ready => handle_key_ready(key),
        SessionStatus::Executing => handle_key_executing(key),
        SessionStatus::Connecting | SessionStatus::Failed | SessionStatus::Disconnected => None,
    }
}

/// Keys that work in every phase
fn handle_key_global(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc | InputKey::CharCtrl('q') => Some(Message::Quit),
        InputKey::CharCtrl('d') => Some(Message::Disconnect),
        InputKey::CharCtrl('l') => Some(Message::ClearTranscript),
        InputKey::PageUp => Some(Message::PageUp),
        InputKey::PageDown => Some(Message::PageDown),
        _ => None,
    }
}

fn handle_key_ready(key: InputKey) -> Option<Message> {
    if let Some(slot) = key.quick_command_slot() {
        return Some(Message::LoadQuickCommand(slot));
    }

    match key {
        InputKey::Char(c) => Some(Message::InsertChar(c)),
        InputKey::Backspace => Some(Message::DeleteBackward),
        InputKey::Delete => Some(Message::DeleteForward),
        InputKey::Left => Some(Message::CursorLeft),
        InputKey::Right => Some(Message::CursorRight),
        InputKey::Home | InputKey::CharCtrl('a') => Some(Message::CursorHome),
        InputKey::End | InputKey::CharCtrl('e') => Some(Message::CursorEnd),
        InputKey::Up => Some(Message::HistoryPrev),
        InputKey::Down => Some(Message::HistoryNext),
        InputKey::Tab => Some(Message::Complete),
        InputKey::Enter => Some(Message::Submit),
        // Ctrl+C with nothing in flight is ignored
        _ => None,
    }
}

/// Input is frozen; only Ctrl+C gets through
fn handle_key_executing(key: InputKey) -> Option<Message> {
    match key {
        InputKey::CharCtrl('c') => Some(Message::CancelCommand),
        _ => None,
    }
}
