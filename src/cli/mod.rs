//! CLI module for the therapy chat client.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version and usage display
//! - Account, chat, roster and dashboard commands
//! - The interactive conversation loop
//!
//! # Usage
//!
//! ```ignore
//! use therapy_chat::cli::{parse_args, run_local_command};
//!
//! let command = parse_args(std::env::args());
//! if let Some(result) = run_local_command(&command) {
//!     return result;
//! }
//! // Otherwise connect and call run_remote_command
//! ```

pub mod args;
pub mod commands;
pub mod session;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use commands::{run_remote_command, CliContext};
pub use session::{prompt_login, run_chat, sign_in};
pub use version::{handle_help_command, handle_version_command, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;

use crate::cli_output::render::error_lines;
use crate::cli_output::{icons, print_hints};
use crate::error::ApiError;

/// Run a command that needs no backend.
///
/// # Returns
///
/// * `None` - The command needs the backend
/// * `Some(Ok(()))` - The command ran
/// * `Some(Err(e))` - The arguments were invalid
pub fn run_local_command(command: &CliCommand) -> Option<Result<()>> {
    match command {
        CliCommand::Version => {
            handle_version_command();
            Some(Ok(()))
        }
        CliCommand::Help => {
            handle_help_command();
            Some(Ok(()))
        }
        CliCommand::Invalid(reason) => Some(Err(eyre!("{}\nRun `therapy-chat --help` for usage.", reason))),
        _ => None,
    }
}

/// Print a failed API call the way the user should see it.
pub fn print_api_error(error: &ApiError) {
    let (message, hint) = error_lines(error);
    eprintln!("  {} {}", icons::FAILURE, message);
    print_hints(&[hint]);
}
