use crate::error::{ReleaseError, Result};
use crate::tools::{display_command, ToolOutput, ToolRunner};
use std::cell::RefCell;
use std::collections::HashMap;

/// Mock runner returning canned output keyed by the joined command line
///
/// Unknown commands succeed with empty output.
pub struct MockToolRunner {
    responses: HashMap<String, ToolOutput>,
    invocations: RefCell<Vec<String>>,
}

impl MockToolRunner {
    pub fn new() -> Self {
        MockToolRunner {
            responses: HashMap::new(),
            invocations: RefCell::new(Vec::new()),
        }
    }

    /// Respond to `command` (e.g. "uv run pytest --cov") with this exit code and output
    pub fn respond(mut self, command: &str, code: i32, output: &str) -> Self {
        self.responses.insert(
            command.to_string(),
            ToolOutput {
                code: Some(code),
                output: output.to_string(),
            },
        );
        self
    }

    /// Command lines run so far, in order
    pub fn invocations(&self) -> Vec<String> {
        self.invocations.borrow().clone()
    }

    fn lookup(&self, argv: &[String]) -> ToolOutput {
        let line = display_command(argv);
        self.invocations.borrow_mut().push(line.clone());
        self.responses.get(&line).cloned().unwrap_or(ToolOutput {
            code: Some(0),
            output: String::new(),
        })
    }
}

impl Default for MockToolRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRunner for MockToolRunner {
    fn capture(&self, argv: &[String]) -> Result<ToolOutput> {
        if argv.is_empty() {
            return Err(ReleaseError::config("cannot run an empty command"));
        }
        Ok(self.lookup(argv))
    }

    fn passthrough(&self, argv: &[String]) -> Result<()> {
        if argv.is_empty() {
            return Err(ReleaseError::config("cannot run an empty command"));
        }
        self.lookup(argv).into_result(argv).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_response() {
        let runner = MockToolRunner::new().respond("uv run pytest", 0, "TOTAL 1 0 100%");
        let out = runner
            .capture(&["uv".to_string(), "run".to_string(), "pytest".to_string()])
            .unwrap();
        assert_eq!(out.output, "TOTAL 1 0 100%");
        assert_eq!(runner.invocations(), vec!["uv run pytest"]);
    }

    #[test]
    fn test_unknown_command_succeeds() {
        let runner = MockToolRunner::new();
        assert!(runner.passthrough(&["uv".to_string(), "sync".to_string()]).is_ok());
    }

    #[test]
    fn test_passthrough_failure() {
        let runner = MockToolRunner::new().respond("uv sync", 2, "");
        assert!(runner
            .passthrough(&["uv".to_string(), "sync".to_string()])
            .is_err());
    }
}
