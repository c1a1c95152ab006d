//! Configuration module for environment variable parsing.
//!
//! Everything is read once at startup and shared read-only afterwards.
//! A missing forward target is not a startup failure: the relay keeps
//! acknowledging webhooks and only logs that nothing is forwarded.

use std::env;
use std::str::FromStr;

use tracing::warn;
use url::Url;

/// Default route the messaging platform posts to.
pub const DEFAULT_WEBHOOK_PATH: &str = "/api/telegram-webhook";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Downstream endpoint that receives relayed payloads (`GAS_URL`)
    pub forward_url: Option<Url>,

    /// Port for the web server to listen on
    pub port: u16,

    /// Route path of the relay handler
    pub webhook_path: String,

    /// Timeout for the outbound forward in milliseconds
    pub forward_timeout_ms: u64,

    /// Maximum accepted inbound body size in bytes
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            forward_url: None,
            port: 8080,
            webhook_path: DEFAULT_WEBHOOK_PATH.to_string(),
            forward_timeout_ms: 10_000,
            max_body_bytes: 2 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            forward_url: parse_forward_url(env::var("GAS_URL").ok().as_deref()),

            port: parse_number("PORT", defaults.port),

            webhook_path: env::var("WEBHOOK_PATH")
                .ok()
                .and_then(|raw| normalize_path(&raw))
                .unwrap_or(defaults.webhook_path),

            forward_timeout_ms: parse_nonzero("FORWARD_TIMEOUT_MS", defaults.forward_timeout_ms),

            max_body_bytes: parse_nonzero("MAX_BODY_BYTES", defaults.max_body_bytes),
        }
    }

    /// Host of the forward target, safe to log (no path or query).
    pub fn forward_host(&self) -> Option<&str> {
        self.forward_url.as_ref().and_then(|u| u.host_str())
    }
}

/// Parse the forward target. Empty, relative or non-http values count as unset.
pub fn parse_forward_url(raw: Option<&str>) -> Option<Url> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;

    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Some(url),
        Ok(url) => {
            warn!(env_var = "GAS_URL", scheme = url.scheme(), "forward_url_unsupported_scheme");
            None
        }
        Err(e) => {
            warn!(env_var = "GAS_URL", error = %e, "forward_url_invalid");
            None
        }
    }
}

/// Parse a numeric variable, falling back to `default` when unset or malformed.
fn parse_number<T: FromStr + Copy>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid number, using default");
            default
        }
    }
}

/// Like [`parse_number`], but zero also falls back to `default`.
fn parse_nonzero<T: FromStr + Copy + Default + PartialEq>(name: &str, default: T) -> T {
    let value = parse_number(name, default);
    if value == T::default() {
        warn!(env_var = name, "Zero is not allowed, using default");
        return default;
    }
    value
}

/// Ensure a route path starts with `/`.
///
/// Blank values are ignored. Paths the router would read as parameters or
/// wildcards (`:`, `*`, `{`, `}`) and the reserved `/health` are rejected.
fn normalize_path(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    };

    if path.contains([':', '*', '{', '}']) {
        warn!(env_var = "WEBHOOK_PATH", value = %path, "webhook_path_not_literal");
        return None;
    }
    if path.trim_end_matches('/') == "/health" {
        warn!(env_var = "WEBHOOK_PATH", value = %path, "webhook_path_reserved");
        return None;
    }

    Some(path)
}
