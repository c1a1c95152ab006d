//! Outcome and error types for outbound forwards.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while building the client or sending a forward.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("network error while forwarding: {0}")]
    Network(#[source] reqwest::Error),
}

impl ForwardError {
    /// Whether the failure was the outbound timeout firing.
    pub fn is_timeout(&self) -> bool {
        match self {
            ForwardError::Network(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// Result of one forward attempt. Only ever used for diagnostics.
#[derive(Debug)]
pub enum ForwardOutcome {
    /// Downstream answered with a 2xx status.
    Delivered { status: StatusCode },

    /// Downstream answered, but with a non-2xx status.
    Rejected { status: StatusCode },

    /// No HTTP response was obtained.
    Failed(ForwardError),
}

impl ForwardOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, ForwardOutcome::Delivered { .. })
    }

    /// Downstream status, if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ForwardOutcome::Delivered { status } | ForwardOutcome::Rejected { status } => {
                Some(*status)
            }
            ForwardOutcome::Failed(_) => None,
        }
    }
}
