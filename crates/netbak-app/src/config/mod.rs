//! Configuration for netbak-term
//!
//! A single TOML file, `<config_dir>/netbak/config.toml`, or whatever path
//! `--config` names.

pub mod settings;
pub mod types;

pub use settings::{default_config_path, init_config_file, load_settings, load_settings_from};
pub use types::*;
