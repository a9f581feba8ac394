//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

const LOG_FILE_NAME: &str = "netbak.log";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/netbak/logs/` (platform data dir).
/// Stdout is never used: it belongs to the TUI or the headless NDJSON stream.
/// Log level is controlled by the `NETBAK_LOG` environment variable.
///
/// # Examples
/// ```bash
/// NETBAK_LOG=debug netbak-term 3
/// NETBAK_LOG=netbak_client=trace netbak-term 3
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    // Default to info for netbak_* targets (prefix match), allow override via NETBAK_LOG
    let env_filter = EnvFilter::try_from_env("NETBAK_LOG")
        .unwrap_or_else(|_| EnvFilter::new("netbak=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("netbak-term starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("netbak").join("logs")
}

/// Get the log file path (the appender adds a date suffix per rotation)
pub fn get_current_log_file() -> PathBuf {
    get_log_directory().join(LOG_FILE_NAME)
}
