//! Per-request result slots.

use crate::error::{FailureKind, LensCoachError};
use serde::Serialize;

/// Message shown when camera settings could not be generated.
pub const SETTINGS_FAILURE_MESSAGE: &str = "Failed to generate camera settings. Please try again.";

/// Why a request failed, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReason {
    /// Failure category.
    pub kind: FailureKind,
    /// User-facing message.
    pub message: String,
}

impl FailureReason {
    /// Normalizes a settings error. The underlying cause is not carried.
    pub fn settings(err: &LensCoachError) -> Self {
        Self {
            kind: err.failure_kind(),
            message: SETTINGS_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// State of one asynchronous request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum RequestOutcome<T> {
    /// Request in flight.
    Pending,
    /// Request completed.
    Success(T),
    /// Request failed.
    Failure(FailureReason),
}

impl<T> RequestOutcome<T> {
    /// Returns true while the request is in flight.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The successful value, if any.
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&FailureReason> {
        match self {
            Self::Failure(reason) => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_failure_hides_cause() {
        let reason = FailureReason::settings(&LensCoachError::Auth("key AIza... rejected".into()));
        assert_eq!(reason.kind, FailureKind::ProviderCommunication);
        assert_eq!(reason.message, SETTINGS_FAILURE_MESSAGE);

        let reason = FailureReason::settings(&LensCoachError::InvalidResponseShape {
            missing: vec!["iso"],
        });
        assert_eq!(reason.kind, FailureKind::InvalidResponseShape);
    }

    #[test]
    fn test_accessors() {
        let pending: RequestOutcome<u8> = RequestOutcome::Pending;
        assert!(pending.is_pending());
        assert_eq!(pending.success(), None);

        let done = RequestOutcome::Success(3u8);
        assert!(!done.is_pending());
        assert_eq!(done.success(), Some(&3));
    }

    #[test]
    fn test_serialize_tagged() {
        let outcome: RequestOutcome<Vec<u8>> = RequestOutcome::Success(vec![]);
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({ "state": "success", "value": [] })
        );
        let pending: RequestOutcome<Vec<u8>> = RequestOutcome::Pending;
        assert_eq!(
            serde_json::to_value(&pending).unwrap(),
            serde_json::json!({ "state": "pending" })
        );
    }
}
