//! Token storage trait abstraction.
//!
//! Durable storage for the access/refresh token pair, behind a trait so the
//! request client can be handed a file-backed store in production and an
//! in-memory one in tests.

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::TokenPair;

/// Token storage errors.
#[derive(Debug, Clone, Error)]
pub enum TokenStoreError {
    /// Failed to load the token pair
    #[error("Failed to load tokens: {0}")]
    LoadFailed(String),
    /// Failed to save the token pair
    #[error("Failed to save tokens: {0}")]
    SaveFailed(String),
    /// Failed to clear the token pair
    #[error("Failed to clear tokens: {0}")]
    ClearFailed(String),
    /// Storage location could not be determined
    #[error("Token storage unavailable: {0}")]
    Unavailable(String),
}

/// Trait for token pair storage and retrieval.
///
/// # Example
///
/// ```ignore
/// use therapy_chat::traits::TokenStore;
///
/// async fn signed_in<S: TokenStore>(store: &S) -> bool {
///     matches!(store.load().await, Ok(Some(pair)) if pair.has_access_token())
/// }
/// ```
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the stored pair.
    ///
    /// # Returns
    /// - `Ok(Some(pair))` if tokens are stored
    /// - `Ok(None)` if nothing is stored
    /// - `Err(error)` if loading failed
    async fn load(&self) -> Result<Option<TokenPair>, TokenStoreError>;

    /// Persist the pair, replacing whatever was stored.
    async fn save(&self, tokens: &TokenPair) -> Result<(), TokenStoreError>;

    /// Delete both stored tokens. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<(), TokenStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_store_error_display() {
        assert_eq!(
            TokenStoreError::LoadFailed("read error".to_string()).to_string(),
            "Failed to load tokens: read error"
        );
        assert_eq!(
            TokenStoreError::SaveFailed("write error".to_string()).to_string(),
            "Failed to save tokens: write error"
        );
        assert_eq!(
            TokenStoreError::ClearFailed("delete error".to_string()).to_string(),
            "Failed to clear tokens: delete error"
        );
        assert_eq!(
            TokenStoreError::Unavailable("no home".to_string()).to_string(),
            "Token storage unavailable: no home"
        );
    }

    #[test]
    fn test_token_store_error_implements_error_trait() {
        let err = TokenStoreError::SaveFailed("x".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
