//! Console I/O trait abstraction.
//!
//! The interactive chat loop and the sign-in prompt read and write through
//! [`Console`], so they can run against scripted input in tests.

use std::io;

/// Console operation errors.
#[derive(Debug)]
pub enum ConsoleError {
    /// IO error while reading or writing
    Io(io::Error),
    /// Input is not available (for example no TTY for a password)
    NotAvailable(String),
}

impl std::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsoleError::Io(err) => write!(f, "Console IO error: {}", err),
            ConsoleError::NotAvailable(msg) => write!(f, "Console not available: {}", msg),
        }
    }
}

impl std::error::Error for ConsoleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConsoleError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ConsoleError {
    fn from(err: io::Error) -> Self {
        ConsoleError::Io(err)
    }
}

/// Line-oriented console.
///
/// `read_line` and `read_password` return `Ok(None)` at end of input.
/// Returned lines have their trailing newline removed.
pub trait Console {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError>;

    /// Like `read_line`, without echoing the input.
    fn read_password(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError>;

    fn write_line(&mut self, line: &str) -> Result<(), ConsoleError>;
}
