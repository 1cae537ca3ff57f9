use std::fmt;

use crate::domain::FileChange;

/// Non-fatal conditions found while preparing a release.
/// These are reported to the user; any prompt that follows decides whether to stop.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseWarning {
    /// Uncommitted changes in the working directory
    DirtyWorkingTree { changes: Vec<FileChange> },
    /// Test output had no `TOTAL ... NN%` line
    CoverageUnavailable,
    /// Coverage parsed but under the configured threshold
    CoverageBelowThreshold { percent: u32, threshold: u32 },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::DirtyWorkingTree { changes } => {
                let noun = if changes.len() == 1 { "file" } else { "files" };
                write!(
                    f,
                    "Working directory has {} uncommitted {}",
                    changes.len(),
                    noun
                )
            }
            ReleaseWarning::CoverageUnavailable => {
                write!(f, "Could not find a coverage total in the test output")
            }
            ReleaseWarning::CoverageBelowThreshold { percent, threshold } => {
                write!(
                    f,
                    "Coverage is {}%, below the {}% threshold",
                    percent, threshold
                )
            }
        }
    }
}
