//! Interactive sign-in and the conversation loop.

use color_eyre::Result;
use tokio::sync::watch;
use tracing::debug;

use crate::api::{DisplayMessage, TherapyApi};
use crate::auth::{ApiClient, AuthState};
use crate::cli_output::icons;
use crate::cli_output::render::message_line;
use crate::error::{ApiError, ApiResult};
use crate::traits::Console;
use crate::view_state::ChatView;

/// Failed password attempts allowed before giving up.
pub const MAX_LOGIN_ATTEMPTS: usize = 3;

const QUIT_COMMANDS: [&str; 3] = ["/quit", "/exit", "/q"];

/// Sign in as `username`, reading the password from the console.
///
/// Returns `Ok(false)` when the input ends before a password is given.
pub async fn sign_in<C: Console>(client: &ApiClient, console: &mut C, username: &str) -> Result<bool> {
    let Some(password) = console.read_password("Password: ")? else {
        return Ok(false);
    };

    client.login(username, &password).await?;
    console.write_line(&format!("  {} Signed in as {}", icons::SUCCESS, username))?;
    Ok(true)
}

/// The sign-in entry point: ask for credentials until login succeeds.
///
/// Returns `Ok(false)` if the user leaves the username empty, the input
/// ends, or the attempts run out.
pub async fn prompt_login<C: Console>(client: &ApiClient, console: &mut C) -> Result<bool> {
    for _ in 0..MAX_LOGIN_ATTEMPTS {
        let username = match console.read_line("Username: ")? {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => return Ok(false),
        };

        match sign_in(client, console, &username).await {
            Ok(signed_in) => return Ok(signed_in),
            Err(report) => match report.downcast_ref::<ApiError>() {
                Some(ApiError::InvalidCredentials) => {
                    console.write_line(&format!("  {} Invalid credentials.", icons::FAILURE))?;
                }
                _ => return Err(report),
            },
        }
    }

    console.write_line(&format!("  {} Too many failed attempts.", icons::FAILURE))?;
    Ok(false)
}

/// Whether the client has announced an expired session since the last check.
fn take_expiry(auth: &mut watch::Receiver<AuthState>) -> bool {
    matches!(auth.has_changed(), Ok(true)) && *auth.borrow_and_update() == AuthState::Expired
}

async fn open_session(view: &mut ChatView, chat_id: i64) -> ApiResult<()> {
    view.refresh_sessions().await?;
    view.select_session(chat_id).await
}

/// Converse with one session until the input ends or the user quits.
///
/// An expired session sends the user back to the sign-in prompt; after a
/// successful sign-in the session is reopened and the loop carries on.
pub async fn run_chat<C: Console>(api: &TherapyApi, console: &mut C, chat_id: i64) -> Result<()> {
    let mut view = ChatView::new(api.clone());
    let mut auth = api.client().subscribe();

    let mut expired = !api.client().is_authenticated().await;
    let mut needs_open = true;

    loop {
        expired |= take_expiry(&mut auth);
        if expired {
            console.write_line("Please sign in to continue.")?;
            if !prompt_login(api.client(), console).await? {
                return Ok(());
            }
            expired = false;
            needs_open = true;
            // Our own sign-in is not news
            auth.borrow_and_update();
        }

        if needs_open {
            match open_session(&mut view, chat_id).await {
                Ok(()) => needs_open = false,
                Err(ApiError::SessionExpired) => {
                    expired = true;
                    continue;
                }
                Err(e) => return Err(e.into()),
            }

            if let Some(session) = view.active_session() {
                console.write_line(&format!("#{} {} [{}]", session.id, session.title, session.ai_mode))?;
            }
            for message in view.messages() {
                console.write_line(&message_line(message))?;
            }
            console.write_line("Type /quit to leave.")?;
        }

        let Some(line) = console.read_line("you> ")? else {
            break;
        };
        let prompt = line.trim();
        if prompt.is_empty() {
            continue;
        }
        if QUIT_COMMANDS.contains(&prompt) {
            break;
        }

        match view.send(prompt).await {
            Ok(reply) => console.write_line(&message_line(&DisplayMessage::assistant(reply)))?,
            Err(ApiError::SessionExpired) => {
                console.write_line(&format!(
                    "  {} {}",
                    icons::WARNING,
                    ApiError::SessionExpired.user_message()
                ))?;
                expired = true;
            }
            Err(e) => {
                debug!(code = e.error_code(), "Send failed");
                console.write_line(&format!("  {} {}", icons::FAILURE, e.user_message()))?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryTokenStore, MockHttpClient, MockResponse, ScriptedConsole};
    use crate::auth::TokenPair;
    use crate::traits::Method;
    use serde_json::json;
    use std::sync::Arc;

    const CHATS: &str = "http://api.test/Chats/";
    const CHAT_DATA: &str = "http://api.test/ChatData/";
    const CONTINUE: &str = "http://api.test/ChatData/continue_chat/";
    const LOGIN: &str = "http://api.test/login/";
    const REFRESH: &str = "http://api.test/refresh/";

    async fn setup(tokens: Option<TokenPair>) -> (TherapyApi, MockHttpClient) {
        let http = MockHttpClient::new();
        let store = match tokens {
            Some(tokens) => InMemoryTokenStore::with_tokens(tokens),
            None => InMemoryTokenStore::new(),
        };
        let client =
            ApiClient::with_base_url("http://api.test", Arc::new(http.clone()), Arc::new(store))
                .unwrap();
        client.restore().await;

        http.push_response(
            Method::Get,
            CHATS,
            MockResponse::json(200, json!([{"id": 7, "title": "Sleep", "AiMode": "therapy"}])),
        );
        http.push_response(
            Method::Get,
            CHAT_DATA,
            MockResponse::json(200, json!([{"chat": 7, "content": [{"role": "user", "message": "earlier"}]}])),
        );
        (TherapyApi::new(Arc::new(client)), http)
    }

    #[tokio::test]
    async fn test_chat_round_trip() {
        let (api, http) = setup(Some(TokenPair::new("a", "r"))).await;
        http.push_response(
            Method::Post,
            CONTINUE,
            MockResponse::json(200, json!({"response": "What keeps you up?"})),
        );
        let mut console = ScriptedConsole::new(["I can't sleep", "/quit"]);

        run_chat(&api, &mut console, 7).await.unwrap();

        assert!(console.printed("you> earlier"));
        assert!(console.printed("assistant> What keeps you up?"));
        assert_eq!(http.requests_to(Method::Post, CONTINUE).len(), 1);
    }

    #[tokio::test]
    async fn test_send_failure_keeps_loop_running() {
        let (api, http) = setup(Some(TokenPair::new("a", "r"))).await;
        http.push_response(
            Method::Post,
            CONTINUE,
            MockResponse::json(500, json!({"detail": "Model unavailable"})),
        );
        let mut console = ScriptedConsole::new(["hello", "again"]);

        run_chat(&api, &mut console, 7).await.unwrap();

        assert!(console.printed("Model unavailable"));
        assert_eq!(http.requests_to(Method::Post, CONTINUE).len(), 2);
    }

    #[tokio::test]
    async fn test_expired_session_returns_to_login() {
        let (api, http) = setup(Some(TokenPair::new("a", "r"))).await;
        http.push_response(Method::Post, CONTINUE, MockResponse::status(401));
        http.push_response(Method::Post, REFRESH, MockResponse::status(401));
        http.push_response(
            Method::Post,
            LOGIN,
            MockResponse::json(200, json!({"access": "a2", "refresh": "r2"})),
        );
        let mut console = ScriptedConsole::new(["hello", "sam", "pw", "/quit"]);

        run_chat(&api, &mut console, 7).await.unwrap();

        assert!(console.printed("session has expired"));
        assert!(console.printed("Signed in as sam"));
        assert!(console.prompts().iter().any(|p| p == "Username: "));
        assert_eq!(api.client().tokens().await, TokenPair::new("a2", "r2"));
        // The session is reopened after signing in again
        assert_eq!(http.requests_to(Method::Get, CHATS).len(), 2);
    }

    #[tokio::test]
    async fn test_signed_out_user_is_asked_to_sign_in_first() {
        let (api, http) = setup(None).await;
        http.push_response(Method::Post, LOGIN, MockResponse::status(401));
        let mut console = ScriptedConsole::new(["sam", "wrong", ""]);

        run_chat(&api, &mut console, 7).await.unwrap();

        assert!(console.printed("Invalid credentials."));
        assert!(http.requests_to(Method::Get, CHATS).is_empty());
    }

    #[tokio::test]
    async fn test_prompt_login_gives_up_after_attempts() {
        let (api, http) = setup(None).await;
        http.push_response(Method::Post, LOGIN, MockResponse::status(400));
        let mut console = ScriptedConsole::new(["sam", "1", "sam", "2", "sam", "3", "sam", "4"]);

        let signed_in = prompt_login(api.client(), &mut console).await.unwrap();

        assert!(!signed_in);
        assert_eq!(http.requests_to(Method::Post, LOGIN).len(), MAX_LOGIN_ATTEMPTS);
        assert!(console.printed("Too many failed attempts."));
    }
}
