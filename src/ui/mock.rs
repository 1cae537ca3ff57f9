use crate::error::{ReleaseError, Result};
use crate::ui::{is_yes, Prompter};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Prompter answering from a fixed script, for tests
///
/// Each prompt consumes the next answer. Running out of answers is an error,
/// so a test fails loudly when the workflow asks something unexpected.
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedPrompter {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// A prompter that must never be asked anything
    pub fn silent() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// Prompts shown so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    fn next(&self, prompt: &str) -> Result<String> {
        self.asked.borrow_mut().push(prompt.to_string());
        self.answers.borrow_mut().pop_front().ok_or_else(|| {
            ReleaseError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("no scripted answer for prompt '{}'", prompt),
            ))
        })
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        Ok(is_yes(&self.next(prompt)?))
    }

    fn input(&self, prompt: &str) -> Result<String> {
        Ok(self.next(prompt)?.trim().to_string())
    }
}
