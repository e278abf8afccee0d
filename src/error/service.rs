//! Errors raised by the screen-time service boundary itself.
//!
//! These are opaque to the rest of the crate: the remote access layer
//! forwards them untouched and the store only ever looks at their message.

use thiserror::Error;

/// Failure reported by a [`ScreenTimeService`](crate::traits::ScreenTimeService)
/// implementation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// The host binding rejected the call; the message is shown as-is
    #[error("{0}")]
    Rejected(String),

    /// Could not reach the service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The service did not answer in time
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// The service answered with a non-success status
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The service answered with something that is not a report
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Whether retrying the same call could plausibly succeed.
    ///
    /// The store never retries on its own; this is a hint for the UI.
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::ConnectionFailed(_) | ServiceError::Timeout(_) => true,
            ServiceError::Status { status, .. } => *status >= 500 || *status == 429,
            ServiceError::Rejected(_) | ServiceError::Decode(_) => false,
        }
    }

    /// Short code for log lines.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Rejected(_) => "E_SVC_REJECTED",
            ServiceError::ConnectionFailed(_) => "E_SVC_CONN",
            ServiceError::Timeout(_) => "E_SVC_TIMEOUT",
            ServiceError::Status { .. } => "E_SVC_STATUS",
            ServiceError::Decode(_) => "E_SVC_DECODE",
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Decode(err.to_string())
    }
}

/// Result alias for boundary calls.
pub type ServiceResult<T> = Result<T, ServiceError>;
