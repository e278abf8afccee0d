//! Errors returned by the remote access layer.

use thiserror::Error;

use super::service::ServiceError;

/// Failure of a `fetch_*` call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The service resolved to "no data" where a report was expected.
    #[error("No {what} returned")]
    EmptyResponse { what: &'static str },

    /// Anything the service itself raised, passed through verbatim.
    #[error(transparent)]
    Transport(#[from] ServiceError),
}

impl FetchError {
    pub fn empty(what: &'static str) -> Self {
        FetchError::EmptyResponse { what }
    }

    pub fn is_empty_response(&self) -> bool {
        matches!(self, FetchError::EmptyResponse { .. })
    }

    /// Short code for log lines.
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::EmptyResponse { .. } => "E_FETCH_EMPTY",
            FetchError::Transport(err) => err.error_code(),
        }
    }

    /// Message to show the user, or `fallback` when the error carries none.
    pub fn display_message(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }
}

/// Result alias for the remote access layer.
pub type FetchResult<T> = Result<T, FetchError>;
