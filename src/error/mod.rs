//! Error handling for the therapy chat client.
//!
//! | Kind | Variant | Retried |
//! |------|---------|---------|
//! | Bad login | [`ApiError::InvalidCredentials`] | No |
//! | Session expiry | [`ApiError::SessionExpired`] | No, terminal |
//! | Rejected request | [`ApiError::Status`] | No |
//! | Transport failure | [`ApiError::Network`] | No |
//!
//! The only failure the client handles itself is a 401 from the backend,
//! which triggers one refresh-and-retry before becoming one of the above.

mod api_error;
mod category;

pub use api_error::{failure_message, ApiError};
pub use category::ErrorCategory;

/// Result alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
