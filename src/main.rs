//! netbak-term - Terminal client for the network device backup console
//!
//! Opens an interactive CLI session on one managed device through the
//! console backend. All logic lives in the workspace crates.

mod headless;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use tracing::info;

use netbak_app::config::{self, Settings};
use netbak_app::Engine;
use netbak_client::HttpCommandChannel;
use netbak_core::DeviceId;

/// netbak-term - Terminal client for the network device backup console
#[derive(Parser, Debug)]
#[command(name = "netbak-term")]
#[command(about = "Interactive CLI session on a managed network device", long_about = None)]
struct Args {
    /// Backend id of the device to open
    #[arg(value_name = "DEVICE_ID", required_unless_present = "init_config")]
    device_id: Option<DeviceId>,

    /// Backend API root, overrides the config file
    #[arg(long, value_name = "URL")]
    server: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Run in headless mode (commands on stdin, NDJSON on stdout)
    #[arg(long)]
    headless: bool,

    /// Write a commented default config file and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if args.init_config {
        return init_config(args.config);
    }

    netbak_core::logging::init()?;

    let device_id = args
        .device_id
        .ok_or_else(|| eyre!("a device id is required"))?;

    let mut settings = config::load_settings(args.config.as_deref());
    apply_overrides(&mut settings, &args);
    info!(
        "Using backend {} for device {}",
        settings.server.base_url, device_id
    );

    let channel = HttpCommandChannel::new(&settings.server.base_url)?;
    let mut engine = Engine::new(device_id, settings, channel);

    if args.headless {
        headless::run_headless(&mut engine).await?;
    } else {
        netbak_tui::run(&mut engine).await?;
    }

    Ok(())
}

/// CLI flags win over the config file
fn apply_overrides(settings: &mut Settings, args: &Args) {
    if let Some(server) = &args.server {
        settings.server.base_url = server.clone();
    }
}

/// Handle `--init-config`
fn init_config(path: Option<PathBuf>) -> Result<()> {
    let path = path
        .or_else(config::default_config_path)
        .ok_or_else(|| eyre!("no config directory on this platform, pass --config"))?;

    if config::init_config_file(&path)? {
        println!("Wrote default config to {}", path.display());
    } else {
        println!("Config already exists at {}, left untouched", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_device_id() {
        let args = Args::try_parse_from(["netbak-term", "3"]).unwrap();
        assert_eq!(args.device_id, Some(3));
        assert!(!args.headless);
    }

    #[test]
    fn test_device_id_required() {
        assert!(Args::try_parse_from(["netbak-term"]).is_err());
        assert!(Args::try_parse_from(["netbak-term", "abc"]).is_err());
    }

    #[test]
    fn test_init_config_without_device() {
        let args = Args::try_parse_from(["netbak-term", "--init-config"]).unwrap();
        assert!(args.init_config);
        assert_eq!(args.device_id, None);
    }

    #[test]
    fn test_server_flag_overrides_settings() {
        let args =
            Args::try_parse_from(["netbak-term", "3", "--server", "http://10.0.0.5:8000/api"])
                .unwrap();
        let mut settings = Settings::default();
        apply_overrides(&mut settings, &args);
        assert_eq!(settings.server.base_url, "http://10.0.0.5:8000/api");
    }

    #[test]
    fn test_no_override_keeps_config_value() {
        let args = Args::try_parse_from(["netbak-term", "3", "--headless"]).unwrap();
        let mut settings = Settings::default();
        apply_overrides(&mut settings, &args);
        assert_eq!(settings.server.base_url, netbak_client::DEFAULT_BASE_URL);
        assert!(args.headless);
    }
}
