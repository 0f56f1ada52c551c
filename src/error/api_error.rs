//! Errors returned by the request client and the endpoint wrappers.

use std::fmt;

use super::category::ErrorCategory;
use crate::traits::HttpError;

/// Failure of an API call.
///
/// `SessionExpired` is deliberately separate from `Status`: it means the
/// tokens are gone and the user has been sent back to sign in, while
/// `Status` is an ordinary rejected request the caller can display.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Transport failure, passed through unchanged.
    Network(HttpError),

    /// Refresh was impossible or failed; tokens have been cleared.
    SessionExpired,

    /// Login was rejected. Carries no server detail on purpose.
    InvalidCredentials,

    /// Non-success response, with the most specific message available.
    Status { status: u16, message: String },

    /// A success response whose body could not be parsed.
    Decode { message: String },

    /// The base URL or a request path could not be turned into a URL.
    InvalidUrl(String),

    /// An operation needs state the caller has not set up yet.
    InvalidState(String),
}

impl ApiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ApiError::Network(_) => ErrorCategory::Network,
            ApiError::SessionExpired | ApiError::InvalidCredentials => ErrorCategory::Auth,
            ApiError::Status { status, .. } if *status >= 500 => ErrorCategory::Server,
            ApiError::Status { .. } => ErrorCategory::User,
            ApiError::Decode { .. } | ApiError::InvalidState(_) => ErrorCategory::Client,
            ApiError::InvalidUrl(_) => ErrorCategory::Configuration,
        }
    }

    /// True for the terminal session-expiry failure.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, ApiError::SessionExpired)
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Could not reach the server. Please try again.".to_string()
            }
            ApiError::SessionExpired => {
                "Your session has expired. Please sign in again.".to_string()
            }
            ApiError::InvalidCredentials => "Invalid credentials.".to_string(),
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Decode { .. } => {
                "The server sent a response that could not be read.".to_string()
            }
            ApiError::InvalidUrl(url) => format!("Invalid server address: {}", url),
            ApiError::InvalidState(message) => message.clone(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "E_API_NETWORK",
            ApiError::SessionExpired => "E_API_SESSION_EXPIRED",
            ApiError::InvalidCredentials => "E_API_INVALID_CREDENTIALS",
            ApiError::Status { .. } => "E_API_STATUS",
            ApiError::Decode { .. } => "E_API_DECODE",
            ApiError::InvalidUrl(_) => "E_API_URL",
            ApiError::InvalidState(_) => "E_API_STATE",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "{}", e),
            ApiError::SessionExpired => write!(f, "Session expired"),
            ApiError::InvalidCredentials => write!(f, "Invalid credentials"),
            ApiError::Status { status, message } => {
                write!(f, "Request failed ({}): {}", status, message)
            }
            ApiError::Decode { message } => write!(f, "Invalid response body: {}", message),
            ApiError::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            ApiError::InvalidState(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        ApiError::Network(e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode {
            message: e.to_string(),
        }
    }
}

/// Extract the most specific error message from a failed response body.
///
/// Looks for a `detail` field, then an `error` field. Falls back to a generic
/// message naming the status code.
pub fn failure_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["detail", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(message_text))
        })
        .unwrap_or_else(|| format!("Request failed with status {}", status))
}

fn message_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.trim().is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
