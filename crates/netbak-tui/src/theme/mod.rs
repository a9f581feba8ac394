//! Theme for the terminal UI
//!
//! - `palette` - raw color constants
//! - `styles` - semantic style builders

pub mod palette;
pub mod styles;
