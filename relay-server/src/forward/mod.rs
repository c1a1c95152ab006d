//! Forward module for relaying payloads downstream.
//!
//! This module provides:
//! - The outcome and error types of a single forward attempt
//! - A shared forwarder that performs or dispatches the outbound POST
//!
//! ## Flow
//!
//! ```text
//! Telegram → Web Server → 200 OK
//!                  └─ spawned task → POST forward target (not awaited)
//! ```

pub mod forwarder;
pub mod types;

pub use forwarder::Forwarder;
pub use types::{ForwardError, ForwardOutcome};
