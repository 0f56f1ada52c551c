//! Handlers for the commands that talk to the backend.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::sync::Arc;
use tracing::debug;

use super::args::CliCommand;
use super::session::{run_chat, sign_in};
use crate::adapters::{FileTokenStore, ReqwestHttpClient};
use crate::api::TherapyApi;
use crate::auth::ApiClient;
use crate::cli_output::render::{message_line, problem_line, session_line, summary_lines, team_lines};
use crate::cli_output::{icons, print_header, print_section_end, print_section_line, print_section_start};
use crate::config::{ClientConfig, CREDENTIALS_PATH_ENV};
use crate::traits::Console;
use crate::view_state::{ChatView, DashboardView, RosterView};

/// Everything a command needs: one shared client and the endpoint wrappers.
pub struct CliContext {
    pub client: Arc<ApiClient>,
    pub api: TherapyApi,
}

impl CliContext {
    /// Wire up the production client and pick up any stored tokens.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let file = config.token_file().ok_or_else(|| {
            eyre!(
                "Could not determine where to store credentials. Set {}.",
                CREDENTIALS_PATH_ENV
            )
        })?;

        let client = ApiClient::new(
            config,
            Arc::new(ReqwestHttpClient::new()),
            Arc::new(FileTokenStore::with_file(file)),
        )?;
        client.restore().await;
        debug!(base_url = %client.base_url(), "Client ready");

        Ok(Self::with_client(Arc::new(client)))
    }

    pub fn with_client(client: Arc<ApiClient>) -> Self {
        Self {
            api: TherapyApi::new(Arc::clone(&client)),
            client,
        }
    }
}

/// Run a command against the backend.
pub async fn run_remote_command<C: Console>(
    command: CliCommand,
    ctx: &CliContext,
    console: &mut C,
) -> Result<()> {
    match command {
        CliCommand::Login { username } => {
            if !sign_in(&ctx.client, console, &username).await? {
                return Err(eyre!("No password given"));
            }
        }
        CliCommand::Register { username, email } => register(ctx, console, &username, &email).await?,
        CliCommand::Logout => {
            ctx.client.logout().await;
            print_section_line(icons::SUCCESS, "Signed out");
        }
        CliCommand::Chats => show_chats(ctx).await?,
        CliCommand::NewChat { mode, title } => {
            let mut view = ChatView::new(ctx.api.clone());
            let session = view.create_session(&title, &mode).await?;
            print_section_line(icons::SUCCESS, &format!("Created {}", session_line(session)));
        }
        CliCommand::History { chat_id } => show_history(ctx, chat_id).await?,
        CliCommand::Send { chat_id, prompt } => {
            let mut view = ChatView::new(ctx.api.clone());
            view.refresh_sessions().await?;
            view.select_session(chat_id).await?;
            let reply = view.send(&prompt).await?;
            println!("{}", reply);
        }
        CliCommand::Chat { chat_id } => run_chat(&ctx.api, console, chat_id).await?,
        CliCommand::Teams => show_teams(ctx).await?,
        CliCommand::Problems => show_problems(ctx).await?,
        CliCommand::Dashboard => show_dashboard(ctx).await?,
        local @ (CliCommand::Version | CliCommand::Help | CliCommand::Invalid(_)) => {
            return Err(eyre!("{:?} does not need the backend", local));
        }
    }
    Ok(())
}

async fn register<C: Console>(
    ctx: &CliContext,
    console: &mut C,
    username: &str,
    email: &str,
) -> Result<()> {
    let password = console.read_password("Password: ")?;
    let confirmation = console.read_password("Confirm password: ")?;

    let password = match (password, confirmation) {
        (Some(password), Some(confirmation)) if password == confirmation => password,
        (Some(_), Some(_)) => return Err(eyre!("Passwords do not match")),
        _ => return Err(eyre!("No password given")),
    };

    ctx.client.register_and_login(username, email, &password).await?;
    print_section_line(icons::SUCCESS, &format!("Registered and signed in as {}", username));
    Ok(())
}

async fn show_chats(ctx: &CliContext) -> Result<()> {
    let mut view = ChatView::new(ctx.api.clone());
    view.refresh_sessions().await?;

    print_header("CHATS");
    if view.sessions().is_empty() {
        print_section_line(icons::ITEM, "No chats yet. Start one with `therapy-chat new <mode> <title>`.");
    }
    for session in view.sessions() {
        println!("  {}", session_line(session));
    }
    print_section_end();
    Ok(())
}

async fn show_history(ctx: &CliContext, chat_id: i64) -> Result<()> {
    let mut view = ChatView::new(ctx.api.clone());
    view.refresh_sessions().await?;
    view.select_session(chat_id).await?;

    if let Some(session) = view.active_session() {
        print_header(&session_line(session));
    }
    if view.messages().is_empty() {
        print_section_line(icons::ITEM, "No messages yet.");
    }
    for message in view.messages() {
        println!("{}", message_line(message));
    }
    print_section_end();
    Ok(())
}

async fn show_teams(ctx: &CliContext) -> Result<()> {
    let mut view = RosterView::new(ctx.api.clone());
    let teams = view.load_teams().await?;

    print_header("TEAMS");
    for team in teams {
        let mut lines = team_lines(team).into_iter();
        if let Some(title) = lines.next() {
            print_section_start(&title);
        }
        for line in lines {
            println!("{}", line);
        }
        print_section_end();
    }
    Ok(())
}

async fn show_problems(ctx: &CliContext) -> Result<()> {
    let mut view = RosterView::new(ctx.api.clone());
    let problems = view.load_problems().await?;

    print_header("PROBLEMS");
    for (index, problem) in problems.iter().enumerate() {
        println!("  {}", problem_line(index, problem));
    }
    print_section_end();
    Ok(())
}

async fn show_dashboard(ctx: &CliContext) -> Result<()> {
    let mut view = DashboardView::new(ctx.api.clone());
    let summary = view.load().await?;

    print_header("DASHBOARD");
    for line in summary_lines(summary) {
        println!("  {}", line);
    }
    print_section_end();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemoryTokenStore, MockHttpClient, MockResponse, ScriptedConsole};
    use crate::auth::TokenPair;
    use crate::traits::Method;
    use serde_json::json;

    fn context(http: &MockHttpClient, store: &InMemoryTokenStore) -> CliContext {
        let client = ApiClient::with_base_url(
            "http://api.test",
            Arc::new(http.clone()),
            Arc::new(store.clone()),
        )
        .unwrap();
        CliContext::with_client(Arc::new(client))
    }

    #[tokio::test]
    async fn test_login_command() {
        let http = MockHttpClient::new();
        let store = InMemoryTokenStore::new();
        http.push_response(
            Method::Post,
            "http://api.test/login/",
            MockResponse::json(200, json!({"access": "a", "refresh": "r"})),
        );
        let mut console = ScriptedConsole::new(["pw"]);

        let command = CliCommand::Login {
            username: "sam".to_string(),
        };
        run_remote_command(command, &context(&http, &store), &mut console)
            .await
            .unwrap();

        assert_eq!(store.get_tokens(), Some(TokenPair::new("a", "r")));
    }

    #[tokio::test]
    async fn test_register_rejects_mismatched_passwords() {
        let http = MockHttpClient::new();
        let store = InMemoryTokenStore::new();
        let mut console = ScriptedConsole::new(["one", "two"]);

        let command = CliCommand::Register {
            username: "sam".to_string(),
            email: "sam@example.com".to_string(),
        };
        let result = run_remote_command(command, &context(&http, &store), &mut console).await;

        assert!(result.is_err());
        assert!(http.get_requests().is_empty());
    }

    #[tokio::test]
    async fn test_logout_command() {
        let http = MockHttpClient::new();
        let store = InMemoryTokenStore::with_tokens(TokenPair::new("a", "r"));
        let ctx = context(&http, &store);
        ctx.client.restore().await;

        run_remote_command(CliCommand::Logout, &ctx, &mut ScriptedConsole::default())
            .await
            .unwrap();

        assert!(store.get_tokens().is_none());
    }

    #[tokio::test]
    async fn test_api_errors_are_downcastable() {
        let http = MockHttpClient::new();
        let store = InMemoryTokenStore::new();
        http.set_default_response(MockResponse::json(404, json!({"detail": "Not found."})));

        let report = run_remote_command(
            CliCommand::Teams,
            &context(&http, &store),
            &mut ScriptedConsole::default(),
        )
        .await
        .unwrap_err();

        let api_error = report.downcast_ref::<crate::error::ApiError>().unwrap();
        assert_eq!(api_error.user_message(), "Not found.");
    }

    #[tokio::test]
    async fn test_local_commands_are_refused() {
        let http = MockHttpClient::new();
        let store = InMemoryTokenStore::new();
        let result = run_remote_command(
            CliCommand::Version,
            &context(&http, &store),
            &mut ScriptedConsole::default(),
        )
        .await;
        assert!(result.is_err());
    }
}
