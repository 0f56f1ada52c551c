//! Console backed by the process's stdin and stdout.

use std::io::{self, BufRead, Write};

use crate::traits::{Console, ConsoleError};

/// Reads stdin line by line; passwords go through `rpassword`.
#[derive(Debug, Default)]
pub struct StdConsole;

impl StdConsole {
    pub fn new() -> Self {
        Self
    }
}

fn show_prompt(prompt: &str) -> Result<(), ConsoleError> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", prompt)?;
    stdout.flush()?;
    Ok(())
}

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        show_prompt(prompt)?;

        let mut input = String::new();
        if io::stdin().lock().read_line(&mut input)? == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn read_password(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        show_prompt(prompt)?;

        match rpassword::read_password() {
            Ok(password) => Ok(Some(password)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(ConsoleError::NotAvailable(e.to_string())),
        }
    }

    fn write_line(&mut self, line: &str) -> Result<(), ConsoleError> {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", line)?;
        Ok(())
    }
}
