//! Version and usage output.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const USAGE: &str = "\
Usage: therapy-chat [command]

Commands:
  login <username>            Sign in (prompts for the password)
  register <username> <email> Create an account and sign in
  logout                      Forget the stored tokens
  chats                       List chat sessions
  new <mode> <title...>       Start a chat session
  history <id>                Show a session's transcript
  send <id> <prompt...>       Send one message and print the reply
  chat <id>                   Converse interactively
  teams                       List teams
  problems                    List problems
  dashboard                   Summary (default)

Options:
  -h, --help                  Show this help
  -V, --version               Show the version

Environment:
  THERAPY_API_URL             Backend origin (default http://localhost:8000)
  THERAPY_CREDENTIALS_PATH    Token file (default ~/.therapy-chat/.credentials.json)
  THERAPY_CHAT_LOG            Log filter (default warn)";

pub fn version_line() -> String {
    format!("therapy-chat {}", VERSION)
}

/// Handle the --version command.
pub fn handle_version_command() {
    println!("{}", version_line());
}

/// Handle the --help command.
pub fn handle_help_command() {
    println!("{}", version_line());
    println!();
    println!("{}", USAGE);
}
