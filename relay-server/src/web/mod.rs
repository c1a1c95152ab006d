//! Web server module for relaying inbound webhooks.
//!
//! This module provides a thin, fast web server that:
//! - Receives Telegram webhooks
//! - Spawns the downstream forward without waiting for it
//! - Returns 200 OK in microseconds
//!
//! Only a non-POST request is ever answered with something other than 200.

pub mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

pub use handlers::{
    health, parse_payload, telegram_webhook, AppState, BodyError, HealthResponse, ACK_BODY,
    METHOD_NOT_ALLOWED_BODY,
};

/// Build the application router for the given state.
pub fn router(state: AppState) -> Router {
    let webhook_path = state.config.webhook_path.clone();
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health))
        .route(&webhook_path, any(telegram_webhook))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
