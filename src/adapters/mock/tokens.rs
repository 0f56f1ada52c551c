//! In-memory token store for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::auth::tokens::TokenPair;
use crate::traits::{TokenStore, TokenStoreError};

/// Token store that keeps the pair in memory.
///
/// Clones share the same storage, so a test can hand one clone to the
/// request client and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTokenStore {
    tokens: Arc<Mutex<Option<TokenPair>>>,
    save_should_fail: Arc<Mutex<bool>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a pair.
    pub fn with_tokens(tokens: TokenPair) -> Self {
        let store = Self::new();
        store.set_tokens(Some(tokens));
        store
    }

    /// Configure whether save should fail.
    pub fn set_save_should_fail(&self, should_fail: bool) {
        *self.save_should_fail.lock().unwrap() = should_fail;
    }

    /// Current contents, read synchronously.
    pub fn get_tokens(&self) -> Option<TokenPair> {
        self.tokens.lock().unwrap().clone()
    }

    pub fn set_tokens(&self, tokens: Option<TokenPair>) {
        *self.tokens.lock().unwrap() = tokens;
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self) -> Result<Option<TokenPair>, TokenStoreError> {
        Ok(self.get_tokens())
    }

    async fn save(&self, tokens: &TokenPair) -> Result<(), TokenStoreError> {
        if *self.save_should_fail.lock().unwrap() {
            return Err(TokenStoreError::SaveFailed("Mock save failure".to_string()));
        }

        self.set_tokens(Some(tokens.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), TokenStoreError> {
        self.set_tokens(None);
        Ok(())
    }
}
