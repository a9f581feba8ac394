//! Main TUI runner - terminal lifecycle and event loop

use netbak_app::Engine;
use netbak_client::CommandChannel;
use netbak_core::prelude::*;

use super::{event, render, terminal};

/// Run the interactive terminal against `engine` until the user quits.
///
/// Restores the terminal and waits for the backend session teardown before
/// returning, also when the loop fails.
pub async fn run<C>(engine: &mut Engine<C>) -> Result<()>
where
    C: CommandChannel + Sync + 'static,
{
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    let mut term = ratatui::init();

    info!("Opening terminal for device {}", engine.state.session.device_id);
    engine.start();

    let result = run_loop(&mut term, engine);
    if let Err(ref e) = result {
        error!("TUI loop failed: {}", e);
    }

    engine.shutdown().await;
    ratatui::restore();

    result
}

/// Main event loop
fn run_loop<C>(terminal: &mut ratatui::DefaultTerminal, engine: &mut Engine<C>) -> Result<()>
where
    C: CommandChannel + Sync + 'static,
{
    while !engine.should_quit() {
        // Results from background tasks, signal handler
        engine.drain_pending_messages();
        if engine.should_quit() {
            break;
        }

        terminal
            .draw(|frame| render::view(frame, &mut engine.state))
            .context("Failed to draw frame")?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    Ok(())
}
