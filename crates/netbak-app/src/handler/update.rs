//! Main update function - central message dispatcher

use chrono::Local;

use netbak_core::prelude::*;

use super::keys::handle_key;
use super::{UpdateAction, UpdateResult};
use crate::message::Message;
use crate::session::Submission;
use crate::state::{AppPhase, AppState};

/// Process a message and update state.
/// Returns an action for the event loop to perform, if any.
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    let appended_before = state.session.transcript.appended();
    let result = dispatch(state, message);
    if state.session.transcript.appended() != appended_before {
        state.scroll.on_new_lines();
    }
    result
}

fn dispatch(state: &mut AppState, message: Message) -> UpdateResult {
    let device_id = state.session.device_id;

    match message {
        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => {
            if state.is_busy() {
                state.spinner_frame = state.spinner_frame.wrapping_add(1);
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Connection lifecycle
        // ─────────────────────────────────────────────────────────
        Message::Connect => {
            if state.session.begin_connect() {
                info!("Connecting to device {}", device_id);
                UpdateResult::action(UpdateAction::Connect { device_id })
            } else {
                UpdateResult::none()
            }
        }

        Message::Connected { device } => {
            info!(
                "Connected to {} ({}) as {}",
                device.name,
                device.address(),
                device.username_or_default()
            );
            let show_banner = state.settings.terminal.show_banner;
            state.session.on_connected(device, show_banner, Local::now());
            UpdateResult::none()
        }

        Message::ConnectFailed { reason } => {
            warn!("Connection to device {} failed: {}", device_id, reason);
            state.session.on_connect_failed(&reason);
            UpdateResult::none()
        }

        Message::Disconnect => {
            if state.session.disconnect() {
                info!("Disconnected from device {}", device_id);
                UpdateResult::action(UpdateAction::CloseSession { device_id })
            } else {
                UpdateResult::none()
            }
        }

        Message::Quit => {
            state.phase = AppPhase::Quitting;
            if state.session.disconnect() {
                info!("Closing session for device {}", device_id);
                UpdateResult::action(UpdateAction::CloseSession { device_id })
            } else {
                UpdateResult::none()
            }
        }

        // ─────────────────────────────────────────────────────────
        // Line editing
        // ─────────────────────────────────────────────────────────
        Message::InsertChar(c) => {
            state.session.insert_char(c);
            UpdateResult::none()
        }
        Message::DeleteBackward => {
            state.session.delete_backward();
            UpdateResult::none()
        }
        Message::DeleteForward => {
            state.session.delete_forward();
            UpdateResult::none()
        }
        Message::CursorLeft => {
            state.session.cursor_left();
            UpdateResult::none()
        }
        Message::CursorRight => {
            state.session.cursor_right();
            UpdateResult::none()
        }
        Message::CursorHome => {
            state.session.cursor_home();
            UpdateResult::none()
        }
        Message::CursorEnd => {
            state.session.cursor_end();
            UpdateResult::none()
        }
        Message::HistoryPrev => {
            state.session.history_prev();
            UpdateResult::none()
        }
        Message::HistoryNext => {
            state.session.history_next();
            UpdateResult::none()
        }
        Message::Complete => {
            state.session.complete(&state.settings.terminal.keywords);
            UpdateResult::none()
        }
        Message::LoadQuickCommand(index) => {
            if let Some(preset) = state.settings.quick_commands.get(index) {
                state.session.load_command(&preset.command);
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Commands
        // ─────────────────────────────────────────────────────────
        Message::Submit => {
            let submission = state.session.submit();
            execute(state, submission)
        }

        Message::SubmitLine(line) => {
            let submission = state.session.submit_line(&line);
            execute(state, submission)
        }

        Message::CommandFinished { request_id, result } => {
            if let Err(reason) = &result {
                warn!("Command request {} failed: {}", request_id, reason);
            }
            if !state.session.on_command_result(request_id, result) {
                debug!("Discarding stale response for request {}", request_id);
            }
            UpdateResult::none()
        }

        Message::CancelCommand => {
            if state.session.cancel() {
                info!("Command interrupted by user");
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // View
        // ─────────────────────────────────────────────────────────
        Message::ClearTranscript => {
            state.session.clear_transcript();
            state.scroll.scroll_to_bottom();
            UpdateResult::none()
        }
        Message::PageUp => {
            let total = state.session.transcript.len();
            state.scroll.page_up(total);
            UpdateResult::none()
        }
        Message::PageDown => {
            state.scroll.page_down();
            UpdateResult::none()
        }
        Message::ScrollToBottom => {
            state.scroll.scroll_to_bottom();
            UpdateResult::none()
        }
    }
}

fn execute(state: &mut AppState, submission: Option<Submission>) -> UpdateResult {
    match submission {
        Some(sub) => {
            debug!("Executing request {}: {:?}", sub.request_id, sub.command);
            state.scroll.scroll_to_bottom();
            UpdateResult::action(UpdateAction::ExecuteCommand {
                device_id: state.session.device_id,
                request_id: sub.request_id,
                command: sub.command,
            })
        }
        None => UpdateResult::none(),
    }
}
