//! Test utilities for the command channel
//!
//! Provides a scripted in-memory [`CommandChannel`] and device fixtures so the
//! TEA layer can be exercised without a backend.

use std::collections::VecDeque;
use std::sync::Mutex;

use netbak_core::prelude::*;
use netbak_core::{DeviceId, DeviceRecord};

use crate::channel::CommandChannel;
use crate::protocol::CommandOutcome;

/// One scripted reply to `execute`
#[derive(Debug)]
pub enum ScriptStep {
    /// Reply immediately with this result
    Reply(Result<CommandOutcome>),
    /// Never reply (simulates a backend that hangs)
    Hang,
}

/// In-memory channel that replays scripted replies in order.
///
/// When the script runs dry, `execute` answers with empty output.
#[derive(Debug, Default)]
pub struct ScriptedChannel {
    device: Option<DeviceRecord>,
    script: Mutex<VecDeque<ScriptStep>>,
    executed: Mutex<Vec<String>>,
    closed: Mutex<u32>,
}

impl ScriptedChannel {
    /// Channel whose handshake returns `device`
    pub fn new(device: DeviceRecord) -> Self {
        Self {
            device: Some(device),
            ..Default::default()
        }
    }

    /// Channel whose handshake fails with `DeviceNotFound`
    pub fn unreachable() -> Self {
        Self::default()
    }

    /// Queue a successful reply with `output`
    pub fn reply_output(self, output: &str) -> Self {
        self.push(ScriptStep::Reply(Ok(CommandOutcome::Completed {
            output: Some(output.to_string()),
            error: None,
        })))
    }

    /// Queue a transport failure
    pub fn reply_error(self, message: &str) -> Self {
        self.push(ScriptStep::Reply(Err(Error::http(message))))
    }

    /// Queue a reply that never arrives
    pub fn hang(self) -> Self {
        self.push(ScriptStep::Hang)
    }

    pub fn push(self, step: ScriptStep) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(step);
        }
        self
    }

    /// Commands received so far, in order
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Number of teardown calls received
    pub fn close_calls(&self) -> u32 {
        self.closed.lock().map(|c| *c).unwrap_or_default()
    }

    fn next_step(&self) -> Option<ScriptStep> {
        self.script.lock().ok().and_then(|mut s| s.pop_front())
    }
}

impl CommandChannel for ScriptedChannel {
    async fn fetch_device(&self, device_id: DeviceId) -> Result<DeviceRecord> {
        match &self.device {
            Some(device) if device.id == device_id => Ok(device.clone()),
            _ => Err(Error::device_not_found(device_id.to_string())),
        }
    }

    async fn execute(&self, _device_id: DeviceId, command: &str) -> Result<CommandOutcome> {
        if let Ok(mut executed) = self.executed.lock() {
            executed.push(command.to_string());
        }
        match self.next_step() {
            Some(ScriptStep::Reply(result)) => result,
            Some(ScriptStep::Hang) => std::future::pending().await,
            None => Ok(CommandOutcome::Completed {
                output: None,
                error: None,
            }),
        }
    }

    async fn close_session(&self, _device_id: DeviceId) -> Result<()> {
        if let Ok(mut closed) = self.closed.lock() {
            *closed += 1;
        }
        Ok(())
    }
}

/// Creates a test device with H3C defaults.
pub fn test_device(id: DeviceId, name: &str) -> DeviceRecord {
    test_device_with_type(id, name, Some("h3c"))
}

/// Creates a test device with a specific `device_type`.
pub fn test_device_with_type(id: DeviceId, name: &str, device_type: Option<&str>) -> DeviceRecord {
    DeviceRecord {
        id,
        name: name.to_string(),
        ip_address: "192.0.2.10".to_string(),
        port: 22,
        username: Some("admin".to_string()),
        protocol: "ssh".to_string(),
        device_type: device_type.map(str::to_string),
        description: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_replies_in_order() {
        let ch = ScriptedChannel::new(test_device(1, "sw1"))
            .reply_output("first")
            .reply_error("down");

        let first = ch.execute(1, "a").await.unwrap();
        assert!(matches!(first, CommandOutcome::Completed { output: Some(o), .. } if o == "first"));
        assert!(ch.execute(1, "b").await.is_err());
        assert!(ch.execute(1, "c").await.is_ok());
        assert_eq!(ch.executed(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_unreachable_handshake() {
        let ch = ScriptedChannel::unreachable();
        assert!(ch.fetch_device(1).await.is_err());
    }

    #[tokio::test]
    async fn test_close_counts() {
        let ch = ScriptedChannel::new(test_device(1, "sw1"));
        ch.close_session(1).await.unwrap();
        ch.close_session(1).await.unwrap();
        assert_eq!(ch.close_calls(), 2);
    }
}
