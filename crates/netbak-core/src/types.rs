//! Core domain types for the terminal client

use serde::{Deserialize, Serialize};

use crate::prompt::PromptMatch;

/// Hostname used in rendered prompts until one is inferred from device output.
pub const DEFAULT_HOSTNAME: &str = "admin";

/// Username used in rendered prompts when the device record carries none.
pub const DEFAULT_USERNAME: &str = "admin";

/// Backend identifier of a managed device
pub type DeviceId = u64;

// ─────────────────────────────────────────────────────────────────────────────
// Device
// ─────────────────────────────────────────────────────────────────────────────

/// A managed network device, as returned by `GET /devices/{id}`.
///
/// Only the fields the terminal needs are declared; unknown fields (including
/// the stored password) are ignored by serde.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeviceRecord {
    pub id: DeviceId,
    pub name: String,
    pub ip_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default = "default_protocol")]
    pub protocol: String,
    #[serde(default)]
    pub device_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_port() -> u16 {
    22
}

fn default_protocol() -> String {
    "ssh".to_string()
}

impl DeviceRecord {
    /// Vendor family derived from `device_type`
    pub fn family(&self) -> DeviceFamily {
        DeviceFamily::from_device_type(self.device_type.as_deref())
    }

    /// `ip:port` for display
    pub fn address(&self) -> String {
        format!("{}:{}", self.ip_address, self.port)
    }

    pub fn username_or_default(&self) -> &str {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_USERNAME)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Device family
// ─────────────────────────────────────────────────────────────────────────────

/// Vendor family, which decides how the local prompt is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceFamily {
    /// H3C / HP Comware: `<host>` and `[host]`
    Comware,
    /// Cisco style: `user@host>` and `user@host#`
    Cisco,
    /// Huawei VRP: `<user-host>` and `[user-host]`
    Huawei,
    /// Anything else gets a shell-like prompt
    #[default]
    Generic,
}

impl DeviceFamily {
    pub fn from_device_type(device_type: Option<&str>) -> Self {
        match device_type.map(|t| t.trim().to_lowercase()).as_deref() {
            Some("h3c") | Some("hp") | Some("comware") => DeviceFamily::Comware,
            Some("cisco") => DeviceFamily::Cisco,
            Some("huawei") => DeviceFamily::Huawei,
            _ => DeviceFamily::Generic,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Prompt state
// ─────────────────────────────────────────────────────────────────────────────

/// Inferred mode of the remote command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptState {
    /// User view (`<host>`, `user@host>`)
    User,
    /// Privileged / system view (`[host]`, `user@host#`)
    Privileged,
    /// Nothing recognizable seen yet
    #[default]
    Unknown,
}

impl PromptState {
    pub fn label(&self) -> &'static str {
        match self {
            PromptState::User => "user",
            PromptState::Privileged => "system",
            PromptState::Unknown => "unknown",
        }
    }
}

/// Everything needed to render the local prompt.
///
/// `state` and `inferred_hostname` are advisory annotations from
/// [`crate::infer_prompt`]; they never affect what is sent to the device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PromptContext {
    pub family: DeviceFamily,
    pub username: String,
    pub state: PromptState,
    pub inferred_hostname: Option<String>,
}

impl PromptContext {
    pub fn new(family: DeviceFamily, username: impl Into<String>) -> Self {
        Self {
            family,
            username: username.into(),
            state: PromptState::Unknown,
            inferred_hostname: None,
        }
    }

    /// Build the context for a freshly fetched device record
    pub fn for_device(device: &DeviceRecord) -> Self {
        Self::new(device.family(), device.username_or_default())
    }

    fn host(&self) -> &str {
        self.inferred_hostname.as_deref().unwrap_or(DEFAULT_HOSTNAME)
    }

    fn user(&self) -> &str {
        if self.username.is_empty() {
            DEFAULT_USERNAME
        } else {
            &self.username
        }
    }

    /// Render the prompt string shown before the input line and echoed commands
    pub fn render(&self) -> String {
        let privileged = self.state == PromptState::Privileged;
        match self.family {
            DeviceFamily::Comware => {
                if privileged {
                    format!("[{}]", self.host())
                } else {
                    format!("<{}>", self.host())
                }
            }
            DeviceFamily::Cisco => {
                let mark = if privileged { '#' } else { '>' };
                format!("{}@{}{}", self.user(), self.host(), mark)
            }
            DeviceFamily::Huawei => {
                // An inferred token already reads `user-host`
                let token = match &self.inferred_hostname {
                    Some(host) => host.clone(),
                    None => format!("{}-{}", self.user(), DEFAULT_HOSTNAME),
                };
                if privileged {
                    format!("[{}]", token)
                } else {
                    format!("<{}>", token)
                }
            }
            DeviceFamily::Generic => format!("{}@{}:~$ ", self.user(), self.host()),
        }
    }

    /// Fold a prompt match into the context.
    ///
    /// Returns `true` if anything changed. `None` fields in the match leave
    /// the prior value untouched.
    pub fn apply(&mut self, found: &PromptMatch) -> bool {
        let mut changed = false;
        if let Some(host) = &found.hostname {
            if self.inferred_hostname.as_deref() != Some(host.as_str()) {
                self.inferred_hostname = Some(host.clone());
                changed = true;
            }
        }
        if found.state != PromptState::Unknown && found.state != self.state {
            self.state = found.state;
            changed = true;
        }
        changed
    }
}
