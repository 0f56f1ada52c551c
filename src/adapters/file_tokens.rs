//! File-based token store adapter.
//!
//! Wraps [`TokenFile`] and implements [`TokenStore`] on top of it.

use async_trait::async_trait;

use crate::auth::tokens::{TokenFile, TokenPair};
use crate::traits::{TokenStore, TokenStoreError};

/// Token store persisted as a JSON file.
///
/// # Example
///
/// ```ignore
/// use therapy_chat::adapters::FileTokenStore;
/// use therapy_chat::traits::TokenStore;
///
/// let store = FileTokenStore::new()?;
/// if let Some(tokens) = store.load().await? {
///     println!("signed in: {}", tokens.has_access_token());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    file: TokenFile,
}

impl FileTokenStore {
    /// Store in the default location under the home directory.
    pub fn new() -> Result<Self, TokenStoreError> {
        TokenFile::default_location()
            .map(Self::with_file)
            .ok_or_else(|| {
                TokenStoreError::Unavailable("Failed to determine home directory".to_string())
            })
    }

    pub fn with_file(file: TokenFile) -> Self {
        Self { file }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<TokenPair>, TokenStoreError> {
        // TokenFile::load returns an empty pair if the file is missing
        let tokens = self.file.load();
        if tokens.is_empty() {
            Ok(None)
        } else {
            Ok(Some(tokens))
        }
    }

    async fn save(&self, tokens: &TokenPair) -> Result<(), TokenStoreError> {
        if self.file.save(tokens) {
            Ok(())
        } else {
            Err(TokenStoreError::SaveFailed(format!(
                "Failed to write {}",
                self.file.path().display()
            )))
        }
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        if self.file.clear() {
            Ok(())
        } else {
            Err(TokenStoreError::ClearFailed(format!(
                "Failed to delete {}",
                self.file.path().display()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp_dir: &TempDir) -> FileTokenStore {
        FileTokenStore::with_file(TokenFile::new(temp_dir.path().join("tokens.json")))
    }

    #[tokio::test]
    async fn test_load_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_in(&temp_dir);

        let tokens = TokenPair::new("access", "refresh");
        store.save(&tokens).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(tokens));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_save_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes File::create fail
        let path = temp_dir.path().join("tokens.json");
        std::fs::create_dir_all(&path).unwrap();
        let store = FileTokenStore::with_file(TokenFile::new(path));

        let result = store.save(&TokenPair::new("a", "r")).await;
        assert!(matches!(result, Err(TokenStoreError::SaveFailed(_))));
    }
}
