//! C3 — classify an error as retryable or terminal, and retry a
//! fallible async operation with capped exponential backoff.

use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryConfig {
    /// `delay = min(max_delay, base_delay * 2^attempt)`, `attempt` is
    /// 0-indexed (the delay before the *first* retry).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let scaled = self.base_delay.saturating_mul(1u32.checked_shl(attempt).unwrap_or(u32::MAX));
        scaled.min(self.max_delay)
    }
}

/// Fixed signature substrings that mark an error as transient (§4.3).
const RETRYABLE_SIGNATURES: &[&str] = &[
    "timeout",
    "timed out",
    "econnreset",
    "connection reset",
    "econnrefused",
    "connection refused",
    "rate limit",
    "rate-limited",
    "429",
    "bad gateway",
    "gateway timeout",
    "502",
    "503",
    "504",
];

/// Fixed signature substrings that are always terminal even though
/// they might otherwise look retryable (checked first).
const TERMINAL_SIGNATURES: &[&str] = &["revert", "contract revert"];

/// Classify an error message as retryable or terminal (§4.3). Unknown
/// messages are terminal — retrying is opt-in, not the default.
pub fn is_retryable(message: &str) -> bool {
    let lower = message.to_lowercase();
    if TERMINAL_SIGNATURES.iter().any(|s| lower.contains(s)) {
        return false;
    }
    RETRYABLE_SIGNATURES.iter().any(|s| lower.contains(s))
}

/// Run `op` until it succeeds, it fails with a terminal error, or
/// `max_retries` retries are exhausted. `classify` maps the error type
/// to a message that `is_retryable` can test; pass `is_retryable`
/// directly when `E: AsRef<str>`-like access is cumbersome.
pub async fn with_retry<T, E, F, Fut>(config: RetryConfig, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                let message = err.to_string();
                if attempt >= config.max_retries || !is_retryable(&message) {
                    return Err(err);
                }
                tokio::time::sleep(config.delay_for(attempt)).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
#[path = "retry_tests.rs"]
mod tests;
