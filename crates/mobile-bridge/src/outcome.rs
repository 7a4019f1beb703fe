//! Uniform result of every bridge call.

use serde::{Deserialize, Serialize};
use tracing::warn;

use sessioncam_core::{BridgeError, ErrorCode};

pub type Outcome<T> = Result<T, BridgeFailure>;

/// A rejected call, tagged with the operation group's code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeFailure {
    pub code: ErrorCode,
    pub message: String,
}

impl BridgeFailure {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for BridgeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for BridgeFailure {}

/// Convert an internal error into a rejection for `operation`.
pub(crate) fn reject(operation: &'static str, code: ErrorCode, err: BridgeError) -> BridgeFailure {
    metrics::counter!("bridge.failures", "operation" => operation, "code" => code.as_str())
        .increment(1);
    warn!(operation, code = %code, error = %err, "bridge call rejected");
    BridgeFailure::new(code, err.to_string())
}

/// Attach the operation's code to an internal result.
pub(crate) trait OutcomeExt<T> {
    fn or_reject(self, operation: &'static str, code: ErrorCode) -> Outcome<T>;
}

impl<T, E> OutcomeExt<T> for Result<T, E>
where
    E: Into<BridgeError>,
{
    fn or_reject(self, operation: &'static str, code: ErrorCode) -> Outcome<T> {
        self.map_err(|e| reject(operation, code, e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sessioncam_core::SdkError;

    #[test]
    fn test_sdk_message_passes_through() {
        let result: Result<(), SdkError> = Err(SdkError::new("no active session"));
        let failure = result
            .or_reject("get_session_id", ErrorCode::GetSessionError)
            .unwrap_err();
        assert_eq!(failure.code, ErrorCode::GetSessionError);
        assert_eq!(failure.message, "no active session");
    }

    #[test]
    fn test_failure_serializes_code_and_message() {
        let failure = BridgeFailure::new(ErrorCode::TrackError, "eventName is required");
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["code"], "TRACK_ERROR");
        assert_eq!(json["message"], "eventName is required");
        assert_eq!(failure.to_string(), "TRACK_ERROR: eventName is required");
    }
}
