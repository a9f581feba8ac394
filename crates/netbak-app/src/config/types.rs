//! Configuration types

use netbak_client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

/// Top-level settings from `config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub terminal: TerminalSettings,

    /// Presets loaded into the buffer with F1..F9
    #[serde(default = "default_quick_commands")]
    pub quick_commands: Vec<QuickCommand>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            terminal: TerminalSettings::default(),
            quick_commands: default_quick_commands(),
        }
    }
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSettings {
    /// API root, e.g. `http://127.0.0.1:8000/api`
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Terminal behaviour
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TerminalSettings {
    /// Tab-completion vocabulary
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// Print the connection banner after the handshake
    #[serde(default = "default_true")]
    pub show_banner: bool,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            show_banner: true,
        }
    }
}

/// A preset command bound to a function key
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuickCommand {
    pub label: String,
    pub command: String,
}

impl QuickCommand {
    pub fn new(label: &str, command: &str) -> Self {
        Self {
            label: label.to_string(),
            command: command.to_string(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_true() -> bool {
    true
}

/// Common network CLI verbs
pub fn default_keywords() -> Vec<String> {
    [
        "display",
        "show",
        "ping",
        "traceroute",
        "telnet",
        "ssh",
        "interface",
        "ip",
        "route",
        "vlan",
        "user",
        "system",
        "quit",
        "exit",
        "help",
        "clear",
        "save",
        "reset",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

pub fn default_quick_commands() -> Vec<QuickCommand> {
    vec![
        QuickCommand::new("Version", "display version"),
        QuickCommand::new("Interfaces", "display interface brief"),
        QuickCommand::new("Config", "display current-configuration"),
        QuickCommand::new("Routes", "display ip routing-table"),
        QuickCommand::new("Ping", "ping 8.8.8.8"),
        QuickCommand::new("Help", "help"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.server.base_url, "http://127.0.0.1:8000/api");
        assert!(s.terminal.show_banner);
        assert!(s.terminal.keywords.contains(&"display".to_string()));
        assert_eq!(s.quick_commands.len(), 6);
    }

    #[test]
    fn test_empty_toml_matches_default() {
        let s: Settings = toml::from_str("").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.quick_commands[0].command, "display version");
        assert_eq!(s.terminal.keywords.len(), 18);
    }

    #[test]
    fn test_partial_sections() {
        let s: Settings = toml::from_str(
            r#"
[terminal]
show_banner = false

[[quick_commands]]
label = "Clock"
command = "display clock"
"#,
        )
        .unwrap();
        assert!(!s.terminal.show_banner);
        assert_eq!(s.terminal.keywords, default_keywords());
        assert_eq!(s.quick_commands, vec![QuickCommand::new("Clock", "display clock")]);
    }
}
