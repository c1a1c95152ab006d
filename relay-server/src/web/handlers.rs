//! Webhook endpoint handlers.
//!
//! The relay handler never makes the caller wait on the downstream. It:
//! 1. Rejects anything but POST with 405
//! 2. Acknowledges with 200 OK when it cannot forward (no target, no body)
//! 3. Otherwise spawns the forward and acknowledges with 200 OK right away
//!
//! Telegram retries every non-200 answer, so configuration and payload
//! problems are only logged, never surfaced.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{Method, StatusCode},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::forward::Forwarder;
use crate::Config;

/// Body of the acknowledgment sent to the webhook caller.
pub const ACK_BODY: &str = "OK";

/// Body of the response to non-POST requests.
pub const METHOD_NOT_ALLOWED_BODY: &str = "Method Not Allowed";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub forwarder: Forwarder,
}

impl AppState {
    pub fn new(config: Config, forwarder: Forwarder) -> Self {
        Self {
            config: Arc::new(config),
            forwarder,
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub forward_configured: bool,
}

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        forward_configured: state.config.forward_url.is_some(),
    })
}

// =============================================================================
// Telegram Webhook
// =============================================================================

/// Reasons an inbound body cannot be forwarded.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("request body is empty")]
    Empty,

    #[error("request body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("request body holds no usable value")]
    Unusable,
}

/// Parse an inbound body into the value to forward.
///
/// `null`, `false`, `0` and `""` are treated the same as a missing body.
pub fn parse_payload(body: &[u8]) -> Result<Value, BodyError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(BodyError::Empty);
    }

    let value: Value = serde_json::from_slice(body)?;
    if is_usable(&value) {
        Ok(value)
    } else {
        Err(BodyError::Unusable)
    }
}

fn is_usable(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn ack() -> (StatusCode, &'static str) {
    (StatusCode::OK, ACK_BODY)
}

/// Telegram webhook endpoint.
///
/// Mounted for every method so that non-POST requests get the plain-text
/// 405 body instead of the router's default.
pub async fn telegram_webhook(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, &'static str) {
    if method != Method::POST {
        warn!(method = %method, "webhook_method_not_allowed");
        return (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_BODY);
    }

    let Some(url) = state.config.forward_url.clone() else {
        error!("webhook_forward_url_missing");
        return ack();
    };

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            error!(error = %rejection, "webhook_body_unreadable");
            return ack();
        }
    };

    let payload = match parse_payload(&body) {
        Ok(payload) => payload,
        Err(e) => {
            error!(body_length = body.len(), error = %e, "webhook_body_invalid");
            return ack();
        }
    };

    info!(
        host = url.host_str().unwrap_or_default(),
        update_id = payload.get("update_id").and_then(serde_json::Value::as_i64),
        body_length = body.len(),
        "webhook_forward_dispatched"
    );

    // Detached: the outcome is only logged by the forwarder
    let _ = state.forwarder.dispatch(url, payload);

    ack()
}
