//! Command channel trait
//!
//! The terminal never talks to a device directly. Every line goes through
//! the backend, one request per line. This trait is what the TEA layer's
//! background tasks call; tests substitute a scripted implementation.

use netbak_core::prelude::*;
use netbak_core::{DeviceId, DeviceRecord};

use crate::protocol::CommandOutcome;

/// Request/response command channel to a managed device.
///
/// Implement [`CommandChannel`] (the `Send` variant); the local variant is
/// provided by a blanket impl.
#[trait_variant::make(CommandChannel: Send)]
pub trait LocalCommandChannel {
    /// Handshake: fetch the device record the session will talk to.
    async fn fetch_device(&self, device_id: DeviceId) -> Result<DeviceRecord>;

    /// Run one command line. `Err` means the request itself failed
    /// (transport, non-2xx status, undecodable body).
    async fn execute(&self, device_id: DeviceId, command: &str) -> Result<CommandOutcome>;

    /// Ask the backend to drop its SSH session for this device.
    async fn close_session(&self, device_id: DeviceId) -> Result<()>;
}
