//! Common test utilities for integration tests.
//!
//! Builds a real [`ApiClient`] (reqwest transport, token file in a temp
//! directory) pointed at a wiremock server.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use therapy_chat::adapters::{FileTokenStore, ReqwestHttpClient};
use therapy_chat::api::TherapyApi;
use therapy_chat::auth::{ApiClient, TokenFile, TokenPair};
use wiremock::MockServer;

/// A client plus the temp directory holding its token file.
pub struct TestClient {
    pub client: Arc<ApiClient>,
    pub token_path: PathBuf,
    _dir: TempDir,
}

impl TestClient {
    /// What is currently persisted on disk.
    pub fn stored_tokens(&self) -> TokenPair {
        TokenFile::new(self.token_path.clone()).load()
    }

    pub fn api(&self) -> TherapyApi {
        TherapyApi::new(Arc::clone(&self.client))
    }
}

/// Tokens that look like a signed-in user.
pub fn signed_in_tokens() -> TokenPair {
    TokenPair::new("access-1", "refresh-1")
}

/// Build a client for `server`, optionally starting from persisted tokens.
pub async fn client_for(server: &MockServer, tokens: Option<TokenPair>) -> TestClient {
    let dir = TempDir::new().unwrap();
    let token_path = dir.path().join(".credentials.json");
    let file = TokenFile::new(token_path.clone());
    if let Some(tokens) = tokens {
        assert!(file.save(&tokens));
    }

    let client = ApiClient::with_base_url(
        &server.uri(),
        Arc::new(ReqwestHttpClient::new()),
        Arc::new(FileTokenStore::with_file(file)),
    )
    .unwrap();
    client.restore().await;

    TestClient {
        client: Arc::new(client),
        token_path,
        _dir: dir,
    }
}
