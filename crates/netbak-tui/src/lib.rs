//! netbak-tui - Terminal UI for netbak-term
//!
//! Renders an [`netbak_app::Engine`]'s state with ratatui and feeds crossterm
//! key events back into it as [`netbak_app::Message`]s.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use runner::run;
