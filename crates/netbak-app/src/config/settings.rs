//! Settings loading for `config.toml`

use std::path::{Path, PathBuf};

use super::types::Settings;
use netbak_core::prelude::*;

const CONFIG_DIR: &str = "netbak";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_CONFIG: &str = r#"# netbak-term configuration

[server]
# Root of the backup console REST API
base_url = "http://127.0.0.1:8000/api"

[terminal]
# Words offered by Tab completion (matched case-insensitively)
keywords = [
    "display", "show", "ping", "traceroute", "telnet", "ssh",
    "interface", "ip", "route", "vlan", "user", "system",
    "quit", "exit", "help", "clear", "save", "reset",
]
# Print the connection banner after connecting
show_banner = true

# Presets loaded into the input line with F1..F9, in order
[[quick_commands]]
label = "Version"
command = "display version"

[[quick_commands]]
label = "Interfaces"
command = "display interface brief"

[[quick_commands]]
label = "Config"
command = "display current-configuration"

[[quick_commands]]
label = "Routes"
command = "display ip routing-table"

[[quick_commands]]
label = "Ping"
command = "ping 8.8.8.8"

[[quick_commands]]
label = "Help"
command = "help"
"#;

/// `<config_dir>/netbak/config.toml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILENAME))
}

/// Load settings from `path`, or from the default location when `None`.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(path: Option<&Path>) -> Settings {
    match path {
        Some(path) => load_settings_from(path),
        None => match default_config_path() {
            Some(path) => load_settings_from(&path),
            None => {
                debug!("No config directory on this platform, using defaults");
                Settings::default()
            }
        },
    }
}

/// Load settings from a specific file, falling back to defaults
pub fn load_settings_from(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Write a commented default config to `config_path`.
///
/// Never overwrites: returns `Ok(false)` if the file already exists.
pub fn init_config_file(config_path: &Path) -> Result<bool> {
    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", parent, e)))?;
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .map_err(|e| Error::config(format!("Failed to write {:?}: {}", config_path, e)))?;

    info!("Wrote default config to {:?}", config_path);
    Ok(true)
}
