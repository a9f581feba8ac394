//! # netbak-core - Core Domain Types
//!
//! Foundation crate for the netbak terminal client. Provides domain types,
//! error handling, logging setup, device-output sanitizing, and prompt
//! inference.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`DeviceRecord`] - A managed network device as returned by the console backend
//! - [`DeviceFamily`] - Vendor family used to render the CLI prompt
//! - [`PromptState`] - Inferred mode of the remote CLI (user, privileged, unknown)
//! - [`PromptContext`] - Prompt state plus the inferred hostname
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Output Cleanup (`ansi`)
//! - [`strip_ansi_codes()`] - Remove terminal escape sequences
//! - [`sanitize_output()`] - Full cosmetic cleanup of paginated device output
//!
//! ### Prompt Inference (`prompt`)
//! - [`infer_prompt()`] - Best-effort prompt/hostname detection in device output
//! - [`PromptMatch`] - A detected prompt token
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use netbak_core::prelude::*;
//! ```

pub mod ansi;
pub mod error;
pub mod logging;
pub mod prelude;
pub mod prompt;
pub mod types;

// Re-export commonly used types at crate root for convenience
pub use ansi::{contains_ansi_codes, sanitize_output, strip_ansi_codes};
pub use error::{Error, Result, ResultExt};
pub use prompt::{infer_prompt, is_bare_prompt_line, PromptMatch};
pub use types::{DeviceFamily, DeviceId, DeviceRecord, PromptContext, PromptState};
