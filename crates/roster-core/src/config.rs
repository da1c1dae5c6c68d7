use std::str::FromStr;

use anyhow::Context as _;

/// Read a required environment variable.
///
/// # Errors
///
/// Returns an error naming the variable when it is unset or not valid UTF-8.
pub fn required_env(key: &str) -> anyhow::Result<String> {
    std::env::var(key).with_context(|| format!("missing required env var {key}"))
}

/// Read an optional environment variable, falling back to `default` when it is
/// unset or cannot be parsed.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(std::env::var(key).ok(), default)
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
