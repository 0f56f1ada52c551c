//! Token pair storage for the therapy chat client.
//!
//! The pair is persisted as `~/.therapy-chat/.credentials.json`, a JSON object
//! with exactly two keys: `access_token` and `refresh_token`.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// The credentials directory name.
pub const CREDENTIALS_DIR: &str = ".therapy-chat";

/// The credentials file name.
pub const CREDENTIALS_FILE: &str = ".credentials.json";

/// Storage key for the access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// The access/refresh token pair held by the request client.
///
/// Both halves are opaque bearer strings. Either may be absent: an empty pair
/// means signed out.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived bearer credential attached to every request.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Longer-lived credential exchanged at `/refresh/` for a new access token.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl TokenPair {
    /// Create a pair holding both tokens.
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access_token: Some(access.into()),
            refresh_token: Some(refresh.into()),
        }
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn has_refresh_token(&self) -> bool {
        self.refresh_token.is_some()
    }

    /// True when neither token is held.
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

// Tokens never reach log output, even at trace level.
impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn mask(token: &Option<String>) -> &'static str {
            if token.is_some() {
                "<redacted>"
            } else {
                "<none>"
            }
        }
        f.debug_struct("TokenPair")
            .field(ACCESS_TOKEN_KEY, &mask(&self.access_token))
            .field(REFRESH_TOKEN_KEY, &mask(&self.refresh_token))
            .finish()
    }
}

/// Manages the token file on disk.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    /// Use an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The default location under the user's home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn default_location() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self::new(home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the pair from disk.
    ///
    /// Returns an empty pair if the file doesn't exist or can't be parsed.
    pub fn load(&self) -> TokenPair {
        if !self.path.exists() {
            return TokenPair::default();
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open token file {}: {}", self.path.display(), e);
                return TokenPair::default();
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(tokens) => tokens,
            Err(e) => {
                warn!("Ignoring unreadable token file {}: {}", self.path.display(), e);
                TokenPair::default()
            }
        }
    }

    /// Write the pair to disk, creating the parent directory if needed.
    ///
    /// Returns `true` if successful, `false` otherwise.
    pub fn save(&self, tokens: &TokenPair) -> bool {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() && fs::create_dir_all(parent).is_err() {
                return false;
            }
        }

        let file = match File::create(&self.path) {
            Ok(f) => f,
            Err(_) => return false,
        };

        let mut writer = BufWriter::new(file);
        if serde_json::to_writer_pretty(&mut writer, tokens).is_err() {
            return false;
        }

        writer.flush().is_ok()
    }

    /// Remove the token file.
    ///
    /// Returns `true` if successful or the file didn't exist.
    pub fn clear(&self) -> bool {
        if !self.path.exists() {
            return true;
        }

        fs::remove_file(&self.path).is_ok()
    }
}
