//! Scripted console for testing.

use std::collections::VecDeque;

use crate::traits::{Console, ConsoleError};

/// Console that answers prompts from a script and captures output.
///
/// Passwords come from the same script as ordinary lines. Once the script
/// runs out every read returns end of input.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    output: Vec<String>,
    prompts: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Everything written so far, one entry per line.
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Whether any written line contains `needle`.
    pub fn printed(&self, needle: &str) -> bool {
        self.output.iter().any(|line| line.contains(needle))
    }

    fn next(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.input.pop_front()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        Ok(self.next(prompt))
    }

    fn read_password(&mut self, prompt: &str) -> Result<Option<String>, ConsoleError> {
        Ok(self.next(prompt))
    }

    fn write_line(&mut self, line: &str) -> Result<(), ConsoleError> {
        self.output.push(line.to_string());
        Ok(())
    }
}
