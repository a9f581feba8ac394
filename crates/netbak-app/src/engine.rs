//! Engine - shared orchestration for the TUI and headless runners
//!
//! Owns the TEA state, the message channel, the command channel, shutdown
//! signalling and teardown task tracking.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc, watch};
use tracing::{info, warn};

use netbak_client::CommandChannel;
use netbak_core::{DeviceId, PromptState};

use crate::actions::TeardownTasks;
use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::process;
use crate::session::{SessionPhase, SessionStatus};
use crate::signals;
use crate::state::AppState;

/// How long shutdown waits for teardown requests
const TEARDOWN_GRACE: Duration = Duration::from_secs(2);

/// Lightweight snapshot of state for change detection
#[derive(Debug, Clone, PartialEq)]
struct StateSnapshot {
    status: SessionStatus,
    executing: Option<u64>,
    appended: u64,
    prompt: String,
    prompt_state: PromptState,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        let session = &state.session;
        let executing = match &session.phase {
            SessionPhase::Executing { request_id, .. } => Some(*request_id),
            _ => None,
        };
        Self {
            status: session.status(),
            executing,
            appended: session.transcript.appended(),
            prompt: session.prompt_text(),
            prompt_state: session.prompt.state,
        }
    }
}

/// Orchestration engine for one terminal session
pub struct Engine<C> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the message channel. Clone for input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half; the frontend loop drains it
    pub msg_rx: mpsc::Receiver<Message>,

    channel: Arc<C>,
    teardown_tasks: TeardownTasks,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    event_tx: broadcast::Sender<EngineEvent>,
}

impl<C> Engine<C>
where
    C: CommandChannel + Sync + 'static,
{
    /// Create an engine for `device_id`.
    ///
    /// Spawns the OS signal handler, so this must be called inside a tokio
    /// runtime. Call [`Engine::start`] to begin the handshake.
    pub fn new(device_id: DeviceId, settings: Settings, channel: C) -> Self {
        let state = AppState::with_settings(device_id, settings);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (event_tx, _) = broadcast::channel(256);

        signals::spawn_signal_handler(msg_tx.clone());

        Self {
            state,
            msg_tx,
            msg_rx,
            channel: Arc::new(channel),
            teardown_tasks: TeardownTasks::default(),
            shutdown_tx,
            shutdown_rx,
            event_tx,
        }
    }

    /// Begin the handshake
    pub fn start(&mut self) {
        self.process_message(Message::Connect);
    }

    /// Subscribe to engine events
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle and emit
    /// events for whatever changed.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(
            &mut self.state,
            msg,
            &self.msg_tx,
            &self.channel,
            &self.teardown_tasks,
            &self.shutdown_rx,
        );

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages. Returns how many ran.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Stop background requests and wait briefly for teardown calls
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);
        let _ = self.shutdown_tx.send(true);

        let tasks: Vec<_> = match self.teardown_tasks.lock() {
            Ok(mut tasks) => tasks.drain(..).collect(),
            Err(_) => Vec::new(),
        };

        for handle in tasks {
            match tokio::time::timeout(TEARDOWN_GRACE, handle).await {
                Ok(Ok(())) => info!("Backend session teardown finished"),
                Ok(Err(e)) => warn!("Teardown task failed: {}", e),
                Err(_) => warn!("Teardown timed out after {:?}", TEARDOWN_GRACE),
            }
        }
    }

    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if pre.status != post.status {
            self.emit(EngineEvent::StatusChanged {
                old: pre.status,
                new: post.status,
            });
            match (&self.state.session.phase, &self.state.session.device) {
                (SessionPhase::Ready, Some(device)) if pre.status == SessionStatus::Connecting => {
                    self.emit(EngineEvent::Connected {
                        device: device.clone(),
                    });
                }
                (SessionPhase::Failed { reason }, _) => {
                    self.emit(EngineEvent::ConnectionFailed {
                        reason: reason.clone(),
                    });
                }
                (SessionPhase::Disconnected, _) => self.emit(EngineEvent::Disconnected),
                _ => {}
            }
        }

        if let (SessionPhase::Executing { request_id, command }, true) = (
            &self.state.session.phase,
            post.executing != pre.executing,
        ) {
            self.emit(EngineEvent::CommandSent {
                request_id: *request_id,
                command: command.clone(),
            });
        }

        if post.appended > pre.appended {
            let new_count = (post.appended - pre.appended) as usize;
            let lines = self.state.session.transcript.tail(new_count).to_vec();
            if !lines.is_empty() {
                self.emit(EngineEvent::Lines { lines });
            }
        }

        if pre.prompt != post.prompt || pre.prompt_state != post.prompt_state {
            self.emit(EngineEvent::PromptChanged {
                prompt: post.prompt.clone(),
                state: post.prompt_state,
            });
        }
    }

    /// Send to all subscribers; having none is fine
    fn emit(&self, event: EngineEvent) {
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netbak_client::test_utils::{test_device, ScriptedChannel};
    use tokio::time::timeout;

    const WAIT: Duration = Duration::from_secs(2);

    /// Receive the next message from a background task and process it
    async fn pump<C: CommandChannel + Sync + 'static>(engine: &mut Engine<C>) {
        let msg = timeout(WAIT, engine.msg_rx.recv())
            .await
            .expect("message within timeout")
            .expect("channel open");
        engine.process_message(msg);
    }

    fn drain_events(rx: &mut broadcast::Receiver<EngineEvent>) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        while let Ok(e) = rx.try_recv() {
            events.push(e);
        }
        events
    }

    #[tokio::test]
    async fn test_handshake_success() {
        let channel = ScriptedChannel::new(test_device(3, "1F_jieru"));
        let mut engine = Engine::new(3, Settings::default(), channel);
        let mut events = engine.subscribe();

        engine.start();
        pump(&mut engine).await;

        assert_eq!(engine.state.session.status(), SessionStatus::Ready);
        let events = drain_events(&mut events);
        assert!(events
            .iter()
            .any(|e| matches!(e, EngineEvent::Connected { device } if device.name == "1F_jieru")));
    }

    #[tokio::test]
    async fn test_handshake_failure() {
        let mut engine = Engine::new(3, Settings::default(), ScriptedChannel::unreachable());
        let mut events = engine.subscribe();

        engine.start();
        pump(&mut engine).await;

        assert_eq!(engine.state.session.status(), SessionStatus::Failed);
        assert!(drain_events(&mut events)
            .iter()
            .any(|e| matches!(e, EngineEvent::ConnectionFailed { reason } if reason.contains("3"))));
    }

    #[tokio::test]
    async fn test_command_round_trip() {
        let channel = ScriptedChannel::new(test_device(1, "sw")).reply_output("10:00:00\n<core-sw>");
        let mut engine = Engine::new(1, Settings::default(), channel);
        engine.start();
        pump(&mut engine).await;

        let mut events = engine.subscribe();
        engine.process_message(Message::SubmitLine("display clock".to_string()));
        assert!(engine.state.session.is_executing());
        pump(&mut engine).await;

        assert!(engine.state.session.is_ready());
        assert_eq!(engine.state.session.prompt_text(), "<core-sw>");
        assert_eq!(engine.channel.executed(), vec!["display clock"]);

        let events = drain_events(&mut events);
        assert!(events
            .iter()
            .any(|e| matches!(e, EngineEvent::CommandSent { command, .. } if command == "display clock")));
        assert!(events.iter().any(|e| matches!(
            e,
            EngineEvent::Lines { lines } if lines.iter().any(|l| l.text == "10:00:00")
        )));
        assert!(events
            .iter()
            .any(|e| matches!(e, EngineEvent::PromptChanged { prompt, .. } if prompt == "<core-sw>")));
    }

    #[tokio::test]
    async fn test_cancel_with_hanging_backend() {
        let channel = ScriptedChannel::new(test_device(1, "sw")).hang();
        let mut engine = Engine::new(1, Settings::default(), channel);
        engine.start();
        pump(&mut engine).await;

        engine.process_message(Message::SubmitLine("display logbuffer".to_string()));
        engine.process_message(Message::CancelCommand);
        assert!(engine.state.session.is_ready());

        // The session stays usable while the first request never returns
        engine.process_message(Message::SubmitLine("display clock".to_string()));
        pump(&mut engine).await;
        assert!(engine.state.session.is_ready());
        assert_eq!(engine.channel.executed().len(), 2);
    }

    #[tokio::test]
    async fn test_quit_tears_down_before_shutdown_returns() {
        let channel = ScriptedChannel::new(test_device(1, "sw"));
        let mut engine = Engine::new(1, Settings::default(), channel);
        engine.start();
        pump(&mut engine).await;

        engine.process_message(Message::Quit);
        assert!(engine.should_quit());
        engine.shutdown().await;
        assert_eq!(engine.channel.close_calls(), 1);
    }
}
