//! Typed wrappers for the therapy backend endpoints.
//!
//! Every call goes through [`ApiClient::request`], so all of them get the
//! bearer token, the silent refresh and the session-expiry handling.

pub mod models;

use std::sync::Arc;
use tracing::debug;

use crate::auth::{ApiClient, RequestOptions};
use crate::error::ApiResult;
pub use models::{
    ChatHistory, ChatSession, ContinueChatRequest, ContinueChatResponse, DisplayMessage,
    HistoryEntry, NewChatSession, Problem, TeamRoster,
};

pub const CHATS_PATH: &str = "/Chats/";
pub const CHAT_DATA_PATH: &str = "/ChatData/";
pub const CONTINUE_CHAT_PATH: &str = "/ChatData/continue_chat/";
pub const TEAM_MEMBERS_PATH: &str = "/TeamMembers/";
pub const PROBLEMS_PATH: &str = "/Problems/";

/// Endpoint wrappers over a shared [`ApiClient`].
#[derive(Clone)]
pub struct TherapyApi {
    client: Arc<ApiClient>,
}

impl TherapyApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    pub async fn list_chats(&self) -> ApiResult<Vec<ChatSession>> {
        self.client.request(CHATS_PATH, RequestOptions::get()).await
    }

    /// Create a session and return the stored record, including its id.
    pub async fn create_chat(&self, title: &str, ai_mode: &str) -> ApiResult<ChatSession> {
        let body = serde_json::to_value(NewChatSession {
            title: title.to_string(),
            ai_mode: ai_mode.to_string(),
        })?;
        self.client.request(CHATS_PATH, RequestOptions::post(body)).await
    }

    pub async fn list_histories(&self) -> ApiResult<Vec<ChatHistory>> {
        self.client.request(CHAT_DATA_PATH, RequestOptions::get()).await
    }

    /// Transcript of one session. A session with no stored record has an
    /// empty transcript.
    pub async fn load_messages(&self, session_id: i64) -> ApiResult<Vec<DisplayMessage>> {
        let histories = self.list_histories().await?;
        let messages = histories
            .iter()
            .find(|history| history.chat == session_id)
            .map(ChatHistory::display_messages)
            .unwrap_or_default();
        debug!(session_id, count = messages.len(), "Loaded transcript");
        Ok(messages)
    }

    /// Send a prompt and return the assistant's reply text.
    pub async fn continue_chat(&self, chat_id: i64, prompt: &str, mode: &str) -> ApiResult<String> {
        let body = serde_json::to_value(ContinueChatRequest {
            chat_id,
            prompt: prompt.to_string(),
            mode: mode.to_string(),
        })?;
        let reply: ContinueChatResponse = self
            .client
            .request(CONTINUE_CHAT_PATH, RequestOptions::post(body))
            .await?;
        Ok(reply.response)
    }

    pub async fn list_teams(&self) -> ApiResult<Vec<TeamRoster>> {
        self.client.request(TEAM_MEMBERS_PATH, RequestOptions::get()).await
    }

    pub async fn list_problems(&self) -> ApiResult<Vec<Problem>> {
        self.client.request(PROBLEMS_PATH, RequestOptions::get()).await
    }
}
