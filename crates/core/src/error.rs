use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

/// Error raised by the native SDK. The message is carried through to the
/// caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SdkError {
    message: String,
}

impl SdkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),

    #[error("Unsupported property at {path}: {reason}")]
    UnsupportedProperty { path: String, reason: String },

    #[error("Context not available")]
    ContextUnavailable,

    #[error(transparent)]
    Sdk(#[from] SdkError),
}

/// Rejection codes surfaced to the application layer, one per operation group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InitError,
    GetSessionError,
    TrackError,
    RecordingError,
    SessionError,
    SetUserError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::InitError => "INIT_ERROR",
            ErrorCode::GetSessionError => "GET_SESSION_ERROR",
            ErrorCode::TrackError => "TRACK_ERROR",
            ErrorCode::RecordingError => "RECORDING_ERROR",
            ErrorCode::SessionError => "SESSION_ERROR",
            ErrorCode::SetUserError => "SET_USER_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_error_message_is_verbatim() {
        let err = BridgeError::from(SdkError::new("invalid sdk key"));
        assert_eq!(err.to_string(), "invalid sdk key");
    }

    #[test]
    fn test_error_code_wire_names() {
        assert_eq!(
            serde_json::to_value(ErrorCode::GetSessionError).unwrap(),
            "GET_SESSION_ERROR"
        );
        assert_eq!(ErrorCode::SetUserError.to_string(), "SET_USER_ERROR");
    }

    #[test]
    fn test_missing_field_message() {
        let err = BridgeError::MissingField { field: "sdkKey" };
        assert_eq!(err.to_string(), "sdkKey is required");
    }
}
