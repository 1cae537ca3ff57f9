//! External tool invocation (test runner, package manager)
//!
//! Commands are argv lists taken from configuration. [ProcessRunner] spawns
//! them for real; [MockToolRunner] returns canned output for tests.

pub mod mock;
pub mod process;

pub use mock::MockToolRunner;
pub use process::ProcessRunner;

use crate::error::{ReleaseError, Result};

/// Captured result of a finished command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub code: Option<i32>,
    /// stdout followed by stderr
    pub output: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Turn a non-zero exit into [ReleaseError::ExternalTool].
    pub fn into_result(self, argv: &[String]) -> Result<String> {
        if self.success() {
            Ok(self.output)
        } else {
            Err(ReleaseError::ExternalTool {
                program: display_command(argv),
                code: self.code,
                output: self.output,
            })
        }
    }
}

/// Runs external commands on behalf of the workflow
pub trait ToolRunner {
    /// Run to completion and capture combined output.
    ///
    /// A non-zero exit is not an error here; callers decide via
    /// [ToolOutput::into_result]. Failing to launch the program is.
    fn capture(&self, argv: &[String]) -> Result<ToolOutput>;

    /// Run with inherited stdio, failing on non-zero exit.
    fn passthrough(&self, argv: &[String]) -> Result<()>;
}

/// Render an argv list for messages
pub fn display_command(argv: &[String]) -> String {
    argv.join(" ")
}
