//! # netbak-client - Backend Command Channel
//!
//! Talks to the backup console's REST backend on behalf of the terminal:
//!
//! - `GET    /devices/{id}`      - handshake, fetches the device record
//! - `POST   /devices/{id}/cli`  - run one command line on the device
//! - `DELETE /devices/{id}/cli`  - best-effort SSH session teardown
//!
//! The [`CommandChannel`] trait is the seam between the TEA layer and the
//! network; [`HttpCommandChannel`] is the production implementation.
//!
//! ## Public API
//!
//! - [`CommandChannel`] / [`LocalCommandChannel`] - async channel trait
//! - [`HttpCommandChannel`] - reqwest-backed implementation
//! - [`CliRequest`], [`CliResponse`], [`CommandOutcome`] - wire and normalized types

pub mod channel;
pub mod http;
pub mod protocol;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use channel::{CommandChannel, LocalCommandChannel};
pub use http::{HttpCommandChannel, DEFAULT_BASE_URL};
pub use protocol::{CliData, CliRequest, CliResponse, CommandOutcome};
