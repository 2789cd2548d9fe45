//! Error types for usage reporting
//!
//! Every failure the pipeline can surface is a distinct `UsageError` variant
//! so callers branch on kind instead of parsing messages.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::impl_wire_code_conversions;

/// Fixed classification codes attached to client-side failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// I/O failure with no usable response.
    UnknownError,
    /// Missing tenant credentials or unreadable configuration.
    ConfigurationError,
    /// Request rejected before it left the process.
    InvalidRequest,
}

impl_wire_code_conversions!(ErrorCode {
    UnknownError => "UNKNOWN_ERROR",
    ConfigurationError => "CONFIGURATION_ERROR",
    InvalidRequest => "INVALID_REQUEST",
});

/// Categories of usage errors for caller retry decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageErrorCategory {
    /// Caller bug (empty argument) - never retry
    Precondition,
    /// Unknown tenant or broken configuration - fix config, do not retry
    Configuration,
    /// No response obtained - retry at caller's discretion
    Transport,
    /// Well-formed non-2xx response - retry per caller policy
    Service,
    /// Idempotency key already consumed upstream - terminal
    Duplicate,
}

/// Usage reporting errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UsageError {
    #[error("Precondition failed: {0}")]
    PreconditionFailed(&'static str),

    #[error("Unknown tenant: no credentials registered for secret key {0}")]
    UnknownTenant(String),

    #[error("Failed to inform Usage with errorCode={code}, message={message}")]
    Transport { code: ErrorCode, message: String },

    #[error("Usage service failure (responseCode={response_code}): {message}")]
    ServiceFailure { response_code: u16, message: String },

    #[error("Usage already reported (responseCode={response_code}): {message}")]
    DuplicateSubmission { response_code: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl UsageError {
    /// Transport failure tagged with the fixed `UNKNOWN_ERROR` code.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport { code: ErrorCode::UnknownError, message: message.into() }
    }

    /// Get the error category for this error
    pub fn category(&self) -> UsageErrorCategory {
        match self {
            Self::PreconditionFailed(_) | Self::Serialization(_) => {
                UsageErrorCategory::Precondition
            }
            Self::UnknownTenant(_) | Self::Config(_) => UsageErrorCategory::Configuration,
            Self::Transport { .. } => UsageErrorCategory::Transport,
            Self::ServiceFailure { .. } => UsageErrorCategory::Service,
            Self::DuplicateSubmission { .. } => UsageErrorCategory::Duplicate,
        }
    }

    /// Check if the caller may reasonably retry this error
    pub fn should_retry(&self) -> bool {
        matches!(self.category(), UsageErrorCategory::Transport | UsageErrorCategory::Service)
    }

    /// Wire classification code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Transport { code, .. } => *code,
            Self::UnknownTenant(_) | Self::Config(_) => ErrorCode::ConfigurationError,
            Self::PreconditionFailed(_) | Self::Serialization(_) => ErrorCode::InvalidRequest,
            Self::ServiceFailure { .. } | Self::DuplicateSubmission { .. } => {
                ErrorCode::UnknownError
            }
        }
    }

    /// HTTP status attached to service-side failures
    pub fn response_code(&self) -> Option<u16> {
        match self {
            Self::ServiceFailure { response_code, .. }
            | Self::DuplicateSubmission { response_code, .. } => Some(*response_code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for UsageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type alias for usage operations
pub type Result<T> = std::result::Result<T, UsageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        assert_eq!(
            UsageError::PreconditionFailed("x").category(),
            UsageErrorCategory::Precondition
        );
        assert_eq!(
            UsageError::UnknownTenant("k".into()).category(),
            UsageErrorCategory::Configuration
        );
        assert_eq!(UsageError::transport("refused").category(), UsageErrorCategory::Transport);
        assert_eq!(
            UsageError::ServiceFailure { response_code: 500, message: "x".into() }.category(),
            UsageErrorCategory::Service
        );
        assert_eq!(
            UsageError::DuplicateSubmission { response_code: 409, message: "x".into() }
                .category(),
            UsageErrorCategory::Duplicate
        );
    }

    #[test]
    fn test_should_retry() {
        assert!(UsageError::transport("timeout").should_retry());
        assert!(UsageError::ServiceFailure { response_code: 503, message: String::new() }
            .should_retry());
        assert!(!UsageError::PreconditionFailed("x").should_retry());
        assert!(!UsageError::UnknownTenant("k".into()).should_retry());
        assert!(!UsageError::DuplicateSubmission { response_code: 409, message: String::new() }
            .should_retry());
        assert!(!UsageError::Config("bad".into()).should_retry());
    }

    #[test]
    fn transport_display_carries_unknown_error_code() {
        let err = UsageError::transport("connection refused");
        assert_eq!(
            err.to_string(),
            "Failed to inform Usage with errorCode=UNKNOWN_ERROR, message=connection refused"
        );
        assert_eq!(err.code(), ErrorCode::UnknownError);
    }

    #[test]
    fn response_code_only_for_service_side_errors() {
        let dup = UsageError::DuplicateSubmission { response_code: 409, message: "m".into() };
        assert_eq!(dup.response_code(), Some(409));
        assert_eq!(UsageError::transport("x").response_code(), None);
    }

    #[test]
    fn error_code_parses_from_wire() {
        assert_eq!("UNKNOWN_ERROR".parse::<ErrorCode>().unwrap(), ErrorCode::UnknownError);
        assert_eq!(
            "configuration_error".parse::<ErrorCode>().unwrap(),
            ErrorCode::ConfigurationError
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::InvalidRequest).unwrap(),
            "\"INVALID_REQUEST\""
        );
    }
}
