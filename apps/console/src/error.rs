//! # API Error Type
//!
//! Unified error type for console commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in MedMap                                 │
//! │                                                                         │
//! │  medmap bed-toggle 3                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown id? ───────── CoreError::RecordNotFound ──────┐        │  │
//! │  │         │                                              │        │  │
//! │  │         ▼                                              ▼        │  │
//! │  │  Refused? ──────── CoreError::TransitionNotAllowed ── ApiError ─►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stdout: {"code": "TRANSITION_REFUSED",                                 │
//! │           "message": "bed 3 cannot move from cleaning to occupied"}     │
//! │  exit status 1                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use medmap_core::{CoreError, ValidationError};

/// Error returned from console commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "ambulance not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No record with the given id
    NotFound,

    /// Bad input: missing field, malformed number or date, unknown tag
    ValidationError,

    /// The status table refuses the change
    TransitionRefused,

    /// Console-side failure (poisoned lock, output encoding)
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Process exit status for a one-shot command that failed this way.
    pub const fn exit_code(&self) -> u8 {
        match self.code {
            ErrorCode::Internal => 2,
            _ => 1,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::RecordNotFound { .. } => ErrorCode::NotFound,
            CoreError::TransitionNotAllowed { .. } => ErrorCode::TransitionRefused,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Failed to encode output: {}", err);
        ApiError::internal("Failed to encode output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medmap_core::RecordKind;

    #[test]
    fn test_core_error_codes() {
        let err = ApiError::from(CoreError::RecordNotFound {
            kind: RecordKind::Ambulance,
            id: "42".to_string(),
        });
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "ambulance not found: 42");

        let err = ApiError::from(CoreError::TransitionNotAllowed {
            kind: RecordKind::Bed,
            id: "3".to_string(),
            from: "cleaning".to_string(),
            to: "occupied".to_string(),
        });
        assert_eq!(err.code, ErrorCode::TransitionRefused);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::validation("name is required");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "name is required");
    }

    #[test]
    fn test_internal_exit_code() {
        assert_eq!(ApiError::internal("lock poisoned").exit_code(), 2);
    }
}
