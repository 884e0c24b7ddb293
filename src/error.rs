//! Error types for the LTX-2 client.

use std::time::Duration;

/// Errors that can occur while talking to the LTX-2 API.
#[derive(Debug, thiserror::Error)]
pub enum CineClawError {
    /// API key missing, invalid, or expired (HTTP 401).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Insufficient credits on the account (HTTP 402/403).
    #[error("insufficient balance: {0}")]
    Billing(String),

    /// Invalid request parameters, rejected locally or by the API (HTTP 422).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Rate limit exceeded (HTTP 429).
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Server-suggested wait, from the `Retry-After` header when present.
        retry_after: Option<Duration>,
    },

    /// Polling exceeded the configured deadline.
    #[error("operation timed out after {0:?}")]
    Timeout(Duration),

    /// API returned an error response not covered by a more specific variant.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code, or 0 when the error did not carry one.
        status: u16,
        /// Server-provided message, sanitized.
        message: String,
    },

    /// The job reached a terminal failed/error status.
    #[error("video generation failed: {0}")]
    Generation(String),

    /// The API returned a response shape we don't understand.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error (e.g., reading source media, saving the video).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CineClawError {
    /// Returns true if this error is likely transient and worth retrying.
    ///
    /// The client itself never retries; this is advisory for callers.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout(_) | Self::Network(_)
        )
    }

    /// Returns the suggested retry delay, if available.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            Self::Timeout(_) => Some(Duration::from_secs(1)),
            Self::Network(_) => Some(Duration::from_secs(2)),
            _ => None,
        }
    }
}

/// Result type alias for LTX-2 client operations.
pub type Result<T> = std::result::Result<T, CineClawError>;

const MAX_ERROR_LEN: usize = 500;

/// Trims an API error body down to something printable.
///
/// Response bodies can be arbitrarily large HTML or binary noise; keep the
/// first few hundred chars and drop control characters.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .collect();
    let trimmed = cleaned.trim();
    if trimmed.len() > MAX_ERROR_LEN {
        let mut end = MAX_ERROR_LEN;
        while !trimmed.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &trimmed[..end])
    } else {
        trimmed.to_string()
    }
}

/// Parses the `Retry-After` header as a number of seconds.
pub(crate) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
