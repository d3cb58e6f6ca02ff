//! Shared error type across hrdesk crates.

use thiserror::Error;

/// Stable error codes surfaced to UI adapters and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Configuration value out of range (e.g. negative debounce delay).
    InvalidConfig,
    /// Operation on a torn-down gateway.
    Disposed,
    /// File failed the upload policy.
    ValidationRejected,
    /// Malformed document or argument.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Environment failure.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and adapter responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidConfig => "INVALID_CONFIG",
            ErrorCode::Disposed => "DISPOSED",
            ErrorCode::ValidationRejected => "VALIDATION_REJECTED",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, DeskError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum DeskError {
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("gateway disposed")]
    Disposed,
    #[error("validation rejected: {0}")]
    ValidationRejected(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl DeskError {
    /// Map error to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            DeskError::InvalidConfig(_) => ErrorCode::InvalidConfig,
            DeskError::Disposed => ErrorCode::Disposed,
            DeskError::ValidationRejected(_) => ErrorCode::ValidationRejected,
            DeskError::BadRequest(_) => ErrorCode::BadRequest,
            DeskError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            DeskError::Internal(_) => ErrorCode::Internal,
        }
    }
}
