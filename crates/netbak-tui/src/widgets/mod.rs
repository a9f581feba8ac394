//! Custom widget components

mod header;
mod quick_bar;
mod status_bar;
mod terminal_view;

pub use header::DeviceHeader;
pub use quick_bar::QuickCommandBar;
pub use status_bar::StatusBar;
pub use terminal_view::{wrap_line, TerminalView};
