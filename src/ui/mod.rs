//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - `mock` - Scripted answers for tests
//! - This module - The [Prompter] seam and its terminal implementation

use std::io;

use console::Term;

use crate::error::Result;

pub mod formatter;
pub mod mock;

pub use formatter::{
    display_changed_files, display_coverage, display_error, display_release_complete,
    display_status, display_success, display_tool_output, display_version_change,
    display_warning,
};
pub use mock::ScriptedPrompter;

/// Confirmation channel used by the release workflow
pub trait Prompter {
    /// Ask a yes/no question. Anything other than "y" or "yes" is a no.
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Ask for a line of free text, returned trimmed.
    fn input(&self, prompt: &str) -> Result<String>;
}

/// Accepts "y" or "yes" (case-insensitive); everything else, including Enter, is no.
pub fn is_yes(answer: &str) -> bool {
    let response = answer.trim().to_lowercase();
    response == "y" || response == "yes"
}

/// Prompts on the controlling terminal
pub struct TerminalPrompter {
    term: Term,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        TerminalPrompter {
            term: Term::stdout(),
        }
    }

    fn read_line(&self) -> Result<String> {
        if self.term.is_term() {
            return Ok(self.term.read_line()?);
        }

        // Piped stdin, e.g. `yes | git-release release`
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input)
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.term.write_str(&format!("\n{} (y/N): ", prompt))?;
        let input = self.read_line()?;
        Ok(is_yes(&input))
    }

    fn input(&self, prompt: &str) -> Result<String> {
        self.term.write_str(&format!("{}: ", prompt))?;
        Ok(self.read_line()?.trim().to_string())
    }
}
