//! Error taxonomy for the screen-time state layer.
//!
//! | Type | Raised by | Meaning |
//! |------|-----------|---------|
//! | [`ServiceError`] | service boundary | transport / binding failure, opaque |
//! | [`FetchError::EmptyResponse`] | remote access layer | service returned no data |
//! | [`FetchError::Transport`] | remote access layer | a [`ServiceError`], verbatim |
//!
//! Store actions are the only recovery boundary: they turn a [`FetchError`]
//! into the display string kept in the `error` field.

mod fetch;
mod service;

pub use fetch::{FetchError, FetchResult};
pub use service::{ServiceError, ServiceResult};

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Error codes survive the conversion from service to fetch errors.
    #[test]
    fn test_error_codes_propagate() {
        let svc = ServiceError::Timeout("10s".to_string());
        let fetch: FetchError = svc.clone().into();
        assert_eq!(fetch.error_code(), svc.error_code());
        assert_eq!(fetch.to_string(), svc.to_string());
    }

    #[test]
    fn test_errors_implement_std_error() {
        let _: &dyn std::error::Error = &FetchError::empty("overview");
        let _: &dyn std::error::Error = &ServiceError::Decode("x".to_string());
    }
}
