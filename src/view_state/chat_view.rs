//! Chat session list, active session and transcript.

use tracing::debug;

use crate::api::{ChatSession, DisplayMessage, TherapyApi};
use crate::error::{ApiError, ApiResult};

/// State behind the chat screens.
///
/// Holds the session list, which session is active, and that session's
/// transcript. Failed operations leave their message in `last_error` for
/// display and also return the error.
pub struct ChatView {
    api: TherapyApi,
    sessions: Vec<ChatSession>,
    active: Option<i64>,
    messages: Vec<DisplayMessage>,
    last_error: Option<String>,
}

impl ChatView {
    pub fn new(api: TherapyApi) -> Self {
        Self {
            api,
            sessions: Vec::new(),
            active: None,
            messages: Vec::new(),
            last_error: None,
        }
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn messages(&self) -> &[DisplayMessage] {
        &self.messages
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn active_session(&self) -> Option<&ChatSession> {
        let id = self.active?;
        self.sessions.iter().find(|session| session.id == id)
    }

    pub async fn refresh_sessions(&mut self) -> ApiResult<()> {
        let result = self.api.list_chats().await;
        let sessions = self.record(result)?;
        debug!(count = sessions.len(), "Loaded chat sessions");
        self.sessions = sessions;
        Ok(())
    }

    /// Create a session, put it at the top of the list and make it active
    /// with an empty transcript.
    pub async fn create_session(&mut self, title: &str, ai_mode: &str) -> ApiResult<&ChatSession> {
        let title = title.trim();
        if title.is_empty() {
            return self.fail(ApiError::InvalidState("Title is required".to_string()));
        }

        let result = self.api.create_chat(title, ai_mode).await;
        let created = self.record(result)?;

        self.sessions.retain(|session| session.id != created.id);
        self.active = Some(created.id);
        self.messages.clear();
        self.sessions.insert(0, created);
        Ok(&self.sessions[0])
    }

    /// Make a listed session active and load its transcript.
    pub async fn select_session(&mut self, session_id: i64) -> ApiResult<()> {
        if !self.sessions.iter().any(|session| session.id == session_id) {
            return self.fail(ApiError::InvalidState(format!(
                "Unknown chat session {}",
                session_id
            )));
        }

        let result = self.api.load_messages(session_id).await;
        self.messages = self.record(result)?;
        self.active = Some(session_id);
        Ok(())
    }

    /// Send a prompt to the active session and return the reply.
    ///
    /// The user's message stays in the transcript even when the send fails.
    pub async fn send(&mut self, prompt: &str) -> ApiResult<String> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return self.fail(ApiError::InvalidState("Message is empty".to_string()));
        }

        let Some((chat_id, mode)) = self
            .active_session()
            .map(|session| (session.id, session.ai_mode.clone()))
        else {
            return self.fail(ApiError::InvalidState("No chat session selected".to_string()));
        };

        self.messages.push(DisplayMessage::user(prompt));
        let result = self.api.continue_chat(chat_id, prompt, &mode).await;
        let reply = self.record(result)?;
        self.messages.push(DisplayMessage::assistant(reply.clone()));
        Ok(reply)
    }

    fn record<T>(&mut self, result: ApiResult<T>) -> ApiResult<T> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Ok(value)
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail<T>(&mut self, error: ApiError) -> ApiResult<T> {
        self.last_error = Some(error.user_message());
        Err(error)
    }
}
