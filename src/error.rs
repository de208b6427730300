//! Error types for camera-settings and example-image requests.

use crate::types::ProviderKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maximum length of a provider error body carried into an error message.
const MAX_ERROR_MESSAGE_LEN: usize = 500;

/// Errors that can occur while talking to a provider.
#[derive(Debug, thiserror::Error)]
pub enum LensCoachError {
    /// Local input failed format validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A provider call was attempted with no usable credential.
    #[error("no API key configured for {0}")]
    MissingCredential(ProviderKind),

    /// API key rejected by the provider.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Rate limit exceeded.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Content was blocked by safety filters.
    #[error("content blocked: {0}")]
    ContentBlocked(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Response arrived but did not have the expected envelope.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Structured settings parsed, but required fields were missing or empty.
    #[error("invalid response shape, missing: {}", missing.join(", "))]
    InvalidResponseShape { missing: Vec<&'static str> },

    /// Network or HTTP error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to decode base64 data.
    #[error("failed to decode: {0}")]
    Decode(String),

    /// I/O error (e.g., saving an image).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Provider not available (feature not enabled).
    #[error("provider not available: {0}")]
    ProviderNotAvailable(String),
}

/// How a failure is surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Transport failure, non-2xx response, unparsable body or missing key.
    ProviderCommunication,
    /// Body parsed but a required field was absent.
    InvalidResponseShape,
}

impl LensCoachError {
    /// Classifies this error for the outcome slot.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::InvalidResponseShape { .. } => FailureKind::InvalidResponseShape,
            _ => FailureKind::ProviderCommunication,
        }
    }

    /// Returns the suggested retry delay, if the provider sent one.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

/// Result type alias for lenscoach operations.
pub type Result<T> = std::result::Result<T, LensCoachError>;

/// Truncates a provider error body and redacts anything that looks like a key.
pub(crate) fn sanitize_error_message(text: &str) -> String {
    let redacted: Vec<String> = text
        .split_whitespace()
        .map(|word| {
            let bare = word.trim_matches(|c: char| !c.is_ascii_alphanumeric());
            if (bare.starts_with("AIza") || bare.starts_with("sk-")) && bare.len() > 12 {
                word.replace(bare, "[REDACTED]")
            } else {
                word.to_string()
            }
        })
        .collect();
    let joined = redacted.join(" ");

    if joined.chars().count() > MAX_ERROR_MESSAGE_LEN {
        let truncated: String = joined.chars().take(MAX_ERROR_MESSAGE_LEN).collect();
        format!("{truncated}...")
    } else {
        joined
    }
}

/// Reads a `Retry-After` header expressed in whole seconds.
pub(crate) fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Maps a non-2xx provider response to an error.
pub(crate) fn error_from_status(
    provider: ProviderKind,
    status: u16,
    text: &str,
    headers: &reqwest::header::HeaderMap,
) -> LensCoachError {
    let text = sanitize_error_message(text);
    match status {
        401 | 403 => LensCoachError::Auth(text),
        404 => LensCoachError::InvalidRequest(format!(
            "{provider} model or endpoint not found: {text}"
        )),
        429 => LensCoachError::RateLimited {
            retry_after: parse_retry_after(headers).map(Duration::from_secs),
        },
        _ => {
            let lower = text.to_lowercase();
            if lower.contains("safety")
                || lower.contains("blocked")
                || lower.contains("content_policy")
                || lower.contains("prohibited")
            {
                LensCoachError::ContentBlocked(text)
            } else {
                LensCoachError::Api {
                    status,
                    message: text,
                }
            }
        }
    }
}
