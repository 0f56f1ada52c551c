//! Client configuration.
//!
//! # Example
//!
//! ```ignore
//! use therapy_chat::config::ClientConfig;
//!
//! let config = ClientConfig::from_env()
//!     .with_base_url("https://therapy.example.com");
//! ```

use std::path::PathBuf;
use url::Url;

use crate::auth::TokenFile;
use crate::error::ApiError;

/// Backend origin used when `THERAPY_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable overriding the backend origin.
pub const API_URL_ENV: &str = "THERAPY_API_URL";

/// Environment variable overriding the token file location.
pub const CREDENTIALS_PATH_ENV: &str = "THERAPY_CREDENTIALS_PATH";

/// Environment variable holding the tracing filter directive.
pub const LOG_FILTER_ENV: &str = "THERAPY_CHAT_LOG";

/// Filter used when `THERAPY_CHAT_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Settings for the request client and the CLI around it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Backend origin every relative path is resolved against.
    pub base_url: String,
    /// Token file override. `None` means `~/.therapy-chat/.credentials.json`.
    pub credentials_path: Option<PathBuf>,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            credentials_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Build a config from the environment, falling back to defaults.
    /// Empty values count as unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(url) = non_empty_env(API_URL_ENV) {
            config = config.with_base_url(url);
        }
        if let Some(path) = non_empty_env(CREDENTIALS_PATH_ENV) {
            config = config.with_credentials_path(path);
        }
        if let Some(filter) = non_empty_env(LOG_FILTER_ENV) {
            config = config.with_log_filter(filter);
        }

        config
    }

    /// Parse and validate the base origin. Only http and https are accepted.
    pub fn base_origin(&self) -> Result<Url, ApiError> {
        let url = Url::parse(self.base_url.trim())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;

        match url.scheme() {
            "http" | "https" if url.has_host() => Ok(url),
            _ => Err(ApiError::InvalidUrl(self.base_url.clone())),
        }
    }

    /// The token file to use, or `None` if no home directory is available.
    pub fn token_file(&self) -> Option<TokenFile> {
        match &self.credentials_path {
            Some(path) => Some(TokenFile::new(path.clone())),
            None => TokenFile::default_location(),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
