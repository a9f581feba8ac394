//! Headless mode runner - main event loop without TUI
//!
//! Stdin lines are queued and submitted one at a time, each only once the
//! previous command has answered. Engine events are turned into NDJSON.

use std::collections::VecDeque;

use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};

use netbak_app::{Engine, EngineEvent, Message, SessionStatus};
use netbak_client::CommandChannel;
use netbak_core::prelude::*;

use super::HeadlessEvent;

/// Stdin line that ends the session
const QUIT_COMMAND: &str = ":quit";

/// Input from the stdin reader thread
#[derive(Debug)]
enum StdinInput {
    Line(String),
    Eof,
}

/// What the queue wants the loop to do next
#[derive(Debug, PartialEq, Eq)]
enum QueueAction {
    Submit(String),
    Quit,
}

/// Commands read from stdin that have not been submitted yet
#[derive(Debug, Default)]
struct CommandQueue {
    pending: VecDeque<String>,
    input_closed: bool,
}

impl CommandQueue {
    fn push(&mut self, line: &str) {
        let line = line.trim();
        if !line.is_empty() {
            self.pending.push_back(line.to_string());
        }
    }

    fn close(&mut self) {
        self.input_closed = true;
    }

    /// Decide the next step for the current session status
    fn next_action(&mut self, status: SessionStatus) -> Option<QueueAction> {
        match status {
            SessionStatus::Connecting | SessionStatus::Executing => None,
            SessionStatus::Failed | SessionStatus::Disconnected => Some(QueueAction::Quit),
            SessionStatus::Ready => match self.pending.pop_front() {
                Some(line) if line == QUIT_COMMAND => Some(QueueAction::Quit),
                Some(line) => Some(QueueAction::Submit(line)),
                None if self.input_closed => Some(QueueAction::Quit),
                None => None,
            },
        }
    }
}

/// What woke the event loop
enum Wake {
    Message(Option<Message>),
    Input(Option<StdinInput>),
}

/// Run in headless mode - NDJSON events instead of the TUI
pub async fn run_headless<C>(engine: &mut Engine<C>) -> Result<()>
where
    C: CommandChannel + Sync + 'static,
{
    info!("═══════════════════════════════════════════════════════");
    info!("netbak-term starting in HEADLESS mode");
    info!("Device: {}", engine.state.session.device_id);
    info!("═══════════════════════════════════════════════════════");

    let mut events = engine.subscribe();

    let (input_tx, input_rx) = mpsc::channel::<StdinInput>(64);
    std::thread::spawn(move || read_stdin_blocking(input_tx));

    engine.start();
    flush_events(&mut events);

    let result = headless_event_loop(engine, &mut events, input_rx).await;

    engine.shutdown().await;
    flush_events(&mut events);

    info!("netbak-term headless mode exiting");
    result
}

/// Main headless event loop
async fn headless_event_loop<C>(
    engine: &mut Engine<C>,
    events: &mut broadcast::Receiver<EngineEvent>,
    mut input_rx: mpsc::Receiver<StdinInput>,
) -> Result<()>
where
    C: CommandChannel + Sync + 'static,
{
    let mut queue = CommandQueue::default();
    let mut input_open = true;

    loop {
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        match queue.next_action(engine.state.session.status()) {
            Some(QueueAction::Submit(line)) => {
                engine.process_message(Message::SubmitLine(line));
                flush_events(events);
                continue;
            }
            Some(QueueAction::Quit) => {
                engine.process_message(Message::Quit);
                flush_events(events);
                continue;
            }
            None => {}
        }

        let wake = tokio::select! {
            msg = engine.msg_rx.recv() => Wake::Message(msg),
            input = input_rx.recv(), if input_open => Wake::Input(input),
        };

        match wake {
            Wake::Message(Some(msg)) => {
                engine.process_message(msg);
                flush_events(events);
            }
            Wake::Message(None) => {
                info!("Message channel closed");
                break;
            }
            Wake::Input(Some(StdinInput::Line(line))) => queue.push(&line),
            Wake::Input(Some(StdinInput::Eof)) | Wake::Input(None) => {
                input_open = false;
                queue.close();
            }
        }
    }

    Ok(())
}

/// Write every queued engine event to stdout
fn flush_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => {
                for headless in HeadlessEvent::from_engine_event(&event) {
                    headless.emit();
                }
            }
            Err(broadcast::error::TryRecvError::Lagged(n)) => {
                warn!("Headless output dropped {} engine events", n);
            }
            Err(_) => break,
        }
    }
}

/// Forward stdin lines to the event loop (blocking, runs on its own thread)
fn read_stdin_blocking(input_tx: mpsc::Sender<StdinInput>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        match line {
            Ok(line) => {
                if input_tx.blocking_send(StdinInput::Line(line)).is_err() {
                    return;
                }
            }
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }

    let _ = input_tx.blocking_send(StdinInput::Eof);
    info!("Stdin reader exiting");
}
