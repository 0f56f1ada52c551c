//! Command-line argument parsing for the therapy chat CLI.
//!
//! This module turns the raw argument list into a [`CliCommand`].

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    Login { username: String },
    Register { username: String, email: String },
    Logout,
    /// List chat sessions
    Chats,
    /// Create a chat session
    NewChat { mode: String, title: String },
    /// Print one session's transcript
    History { chat_id: i64 },
    /// Send a single prompt and print the reply
    Send { chat_id: i64, prompt: String },
    /// Interactive conversation on stdin
    Chat { chat_id: i64 },
    Teams,
    Problems,
    /// Summary view (default)
    Dashboard,
    /// Arguments that could not be understood, with the reason
    Invalid(String),
}

impl CliCommand {
    /// Whether the command runs without contacting the backend.
    pub fn is_local(&self) -> bool {
        matches!(self, CliCommand::Version | CliCommand::Help | CliCommand::Invalid(_))
    }
}

/// Parse command-line arguments and return the appropriate command.
///
/// `--version` and `--help` win wherever they appear. Otherwise the first
/// argument names the command.
///
/// # Examples
///
/// ```
/// use therapy_chat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["therapy-chat".to_string(), "history".to_string(), "7".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::History { chat_id: 7 });
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let args: Vec<String> = args.skip(1).collect();

    for arg in &args {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            _ => {}
        }
    }

    let Some((command, rest)) = args.split_first() else {
        return CliCommand::Dashboard;
    };

    match command.as_str() {
        "login" => match rest {
            [username] => CliCommand::Login {
                username: username.clone(),
            },
            _ => usage("login <username>"),
        },
        "register" => match rest {
            [username, email] => CliCommand::Register {
                username: username.clone(),
                email: email.clone(),
            },
            _ => usage("register <username> <email>"),
        },
        "logout" => no_arguments(rest, CliCommand::Logout, "logout"),
        "chats" => no_arguments(rest, CliCommand::Chats, "chats"),
        "teams" => no_arguments(rest, CliCommand::Teams, "teams"),
        "problems" => no_arguments(rest, CliCommand::Problems, "problems"),
        "dashboard" => no_arguments(rest, CliCommand::Dashboard, "dashboard"),
        "new" => match rest {
            [mode, title @ ..] if !title.is_empty() => CliCommand::NewChat {
                mode: mode.clone(),
                title: title.join(" "),
            },
            _ => usage("new <mode> <title...>"),
        },
        "history" => match rest {
            [id] => with_chat_id(id, |chat_id| CliCommand::History { chat_id }),
            _ => usage("history <id>"),
        },
        "send" => match rest {
            [id, prompt @ ..] if !prompt.is_empty() => with_chat_id(id, |chat_id| CliCommand::Send {
                chat_id,
                prompt: prompt.join(" "),
            }),
            _ => usage("send <id> <prompt...>"),
        },
        "chat" => match rest {
            [id] => with_chat_id(id, |chat_id| CliCommand::Chat { chat_id }),
            _ => usage("chat <id>"),
        },
        other => CliCommand::Invalid(format!("Unknown command: {}", other)),
    }
}

fn usage(form: &str) -> CliCommand {
    CliCommand::Invalid(format!("Usage: therapy-chat {}", form))
}

fn no_arguments(rest: &[String], command: CliCommand, form: &str) -> CliCommand {
    if rest.is_empty() {
        command
    } else {
        usage(form)
    }
}

fn with_chat_id(raw: &str, build: impl FnOnce(i64) -> CliCommand) -> CliCommand {
    match raw.parse() {
        Ok(chat_id) => build(chat_id),
        Err(_) => CliCommand::Invalid(format!("Invalid chat id: {}", raw)),
    }
}
