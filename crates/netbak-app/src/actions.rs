//! Action handlers: UpdateAction dispatch and background task spawning

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use netbak_client::CommandChannel;
use netbak_core::{DeviceId, Error};

use crate::message::Message;
use crate::UpdateAction;

/// Teardown tasks the engine waits for on shutdown
pub type TeardownTasks = Arc<std::sync::Mutex<Vec<JoinHandle<()>>>>;

/// Execute an action by spawning a background task.
///
/// Request tasks stop early when `shutdown_rx` flips to `true`; teardown
/// tasks are tracked in `teardown_tasks` so shutdown can wait for them.
pub fn handle_action<C>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    channel: Arc<C>,
    teardown_tasks: &TeardownTasks,
    shutdown_rx: watch::Receiver<bool>,
) where
    C: CommandChannel + Sync + 'static,
{
    match action {
        UpdateAction::Connect { device_id } => {
            tokio::spawn(connect(device_id, msg_tx, channel, shutdown_rx));
        }

        UpdateAction::ExecuteCommand {
            device_id,
            request_id,
            command,
        } => {
            tokio::spawn(execute(
                device_id,
                request_id,
                command,
                msg_tx,
                channel,
                shutdown_rx,
            ));
        }

        UpdateAction::CloseSession { device_id } => {
            let handle = tokio::spawn(close_session(device_id, channel));
            if let Ok(mut tasks) = teardown_tasks.lock() {
                tasks.retain(|t| !t.is_finished());
                tasks.push(handle);
            }
        }
    }
}

async fn connect<C>(
    device_id: DeviceId,
    msg_tx: mpsc::Sender<Message>,
    channel: Arc<C>,
    mut shutdown_rx: watch::Receiver<bool>,
) where
    C: CommandChannel + Sync + 'static,
{
    let msg = tokio::select! {
        result = channel.fetch_device(device_id) => match result {
            Ok(device) => Message::Connected { device },
            Err(e) => Message::ConnectFailed { reason: e.to_string() },
        },
        _ = shutdown_rx.changed() => return,
    };
    let _ = msg_tx.send(msg).await;
}

async fn execute<C>(
    device_id: DeviceId,
    request_id: u64,
    command: String,
    msg_tx: mpsc::Sender<Message>,
    channel: Arc<C>,
    mut shutdown_rx: watch::Receiver<bool>,
) where
    C: CommandChannel + Sync + 'static,
{
    let result = tokio::select! {
        result = channel.execute(device_id, &command) => result.map_err(|e| describe(request_id, e)),
        _ = shutdown_rx.changed() => {
            debug!("Request {} abandoned on shutdown", request_id);
            return;
        }
    };
    let _ = msg_tx
        .send(Message::CommandFinished { request_id, result })
        .await;
}

/// Error text for the transcript
fn describe(request_id: u64, err: Error) -> String {
    if !err.is_recoverable() {
        warn!("Request {} failed with unexpected error: {:?}", request_id, err);
    }
    err.to_string()
}

async fn close_session<C>(device_id: DeviceId, channel: Arc<C>)
where
    C: CommandChannel + Sync + 'static,
{
    match channel.close_session(device_id).await {
        Ok(()) => debug!("Backend session for device {} closed", device_id),
        Err(e) => debug!("Teardown for device {} failed: {}", device_id, e),
    }
}

