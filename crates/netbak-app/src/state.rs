//! Application state (Model in TEA pattern)

use netbak_core::DeviceId;

use crate::config::{QuickCommand, Settings};
use crate::session::{SessionStatus, TerminalSession};
use crate::transcript::ScrollState;

/// Whether the event loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Complete application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub phase: AppPhase,
    pub session: TerminalSession,
    pub settings: Settings,
    /// Transcript view position; the renderer keeps `page_size` current
    pub scroll: ScrollState,
    /// Advanced on every tick while something is in flight
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(device_id: DeviceId) -> Self {
        Self::with_settings(device_id, Settings::default())
    }

    pub fn with_settings(device_id: DeviceId, settings: Settings) -> Self {
        Self {
            phase: AppPhase::Running,
            session: TerminalSession::new(device_id),
            settings,
            scroll: ScrollState::default(),
            spinner_frame: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn quick_commands(&self) -> &[QuickCommand] {
        &self.settings.quick_commands
    }

    /// Whether a spinner should be animating
    pub fn is_busy(&self) -> bool {
        self.session.is_executing() || self.session.status() == SessionStatus::Connecting
    }
}
