//! Message processing: runs `update` and dispatches the resulting actions

use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use netbak_client::CommandChannel;

use crate::actions::{handle_action, TeardownTasks};
use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update loop, following any chained
/// messages and spawning tasks for the actions they produce.
pub fn process_message<C>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    channel: &Arc<C>,
    teardown_tasks: &TeardownTasks,
    shutdown_rx: &watch::Receiver<bool>,
) where
    C: CommandChannel + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(
                action,
                msg_tx.clone(),
                Arc::clone(channel),
                teardown_tasks,
                shutdown_rx.clone(),
            );
        }

        msg = result.message;
    }
}
