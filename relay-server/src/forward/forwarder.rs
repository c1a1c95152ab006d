//! Outbound forwarding of webhook payloads.
//!
//! A single attempt per payload. Failures are logged and returned as a
//! [`ForwardOutcome`]; nothing is retried and nothing reaches the caller.

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client};
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, error};
use url::Url;

use super::types::{ForwardError, ForwardOutcome};

/// Shared forwarder backed by a pooled HTTP client.
///
/// Cloning is cheap: the underlying client is reference counted.
#[derive(Clone, Debug)]
pub struct Forwarder {
    client: Client,
}

impl Forwarder {
    /// Create a forwarder whose outbound calls give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, ForwardError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ForwardError::Client)?;

        Ok(Self { client })
    }

    /// POST `payload` as JSON to `url` and classify the result.
    pub async fn forward(&self, url: &Url, payload: &Value) -> ForwardOutcome {
        let host = url.host_str().unwrap_or_default();

        let body = match serde_json::to_vec(payload) {
            Ok(body) => body,
            Err(e) => {
                error!(host = host, error = %e, "forward_serialize_failed");
                return ForwardOutcome::Failed(ForwardError::Serialize(e));
            }
        };
        let body_length = body.len();

        let result = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await;

        match result {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    debug!(
                        host = host,
                        status_code = status.as_u16(),
                        body_length = body_length,
                        "forward_delivered"
                    );
                    ForwardOutcome::Delivered { status }
                } else {
                    error!(
                        host = host,
                        status_code = status.as_u16(),
                        status_text = status.canonical_reason().unwrap_or_default(),
                        "forward_rejected"
                    );
                    ForwardOutcome::Rejected { status }
                }
            }
            Err(e) => {
                error!(
                    host = host,
                    is_timeout = e.is_timeout(),
                    is_connect = e.is_connect(),
                    error = %e,
                    "forward_network_error"
                );
                ForwardOutcome::Failed(ForwardError::Network(e))
            }
        }
    }

    /// Spawn [`Forwarder::forward`] as a detached task.
    ///
    /// The handle may be dropped; the task keeps running until the runtime
    /// shuts down, at which point an unfinished forward is lost.
    pub fn dispatch(&self, url: Url, payload: Value) -> JoinHandle<ForwardOutcome> {
        let forwarder = self.clone();
        tokio::spawn(async move { forwarder.forward(&url, &payload).await })
    }
}
