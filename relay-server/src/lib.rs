//! Relay - Fire-and-forget webhook relay.
//!
//! This library provides the modules behind the `relay-server` binary:
//! - `config`: environment configuration
//! - `forward`: outbound POST to the forward target
//! - `web`: webhook and health handlers plus the router
//!
//! ## Architecture
//!
//! ```text
//! Telegram → relay-server → 200 OK
//!                  └─ detached task → forward target (e.g. Apps Script)
//! ```

pub mod config;
pub mod forward;
pub mod web;

#[cfg(test)]
mod test_logs;

// Re-export commonly used types
pub use config::Config;
pub use forward::{ForwardError, ForwardOutcome, Forwarder};
pub use web::{router, AppState};
