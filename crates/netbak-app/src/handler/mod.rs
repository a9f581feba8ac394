//! Handler module - TEA update function and key mapping
//!
//! - `update`: main `update()` function and message dispatch
//! - `keys`: key-to-message mapping per session phase

pub(crate) mod keys;
pub(crate) mod update;


use netbak_core::DeviceId;

use crate::message::Message;

pub use keys::handle_key;
pub use update::update;

/// Side effects the event loop performs after `update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateAction {
    /// Handshake: fetch the device record
    Connect { device_id: DeviceId },

    /// Send one command line to the device
    ExecuteCommand {
        device_id: DeviceId,
        request_id: u64,
        command: String,
    },

    /// Best-effort backend teardown; failures are only logged
    CloseSession { device_id: DeviceId },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
