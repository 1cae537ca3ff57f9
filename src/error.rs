use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for git-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Aborted: {0}")]
    Aborted(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Coverage {percent}% is below the {threshold}% threshold")]
    CoverageTooLow { percent: u32, threshold: u32 },

    #[error("Manifest error in {}: {reason}", .path.display())]
    Manifest { path: PathBuf, reason: String },

    #[error("Command `{program}` failed{}", exit_suffix(.code))]
    ExternalTool {
        program: String,
        code: Option<i32>,
        output: String,
    },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" with exit code {}", code),
        None => " without an exit code".to_string(),
    }
}

/// Convenience type alias for Results in git-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    pub fn aborted(msg: impl Into<String>) -> Self {
        ReleaseError::Aborted(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ReleaseError::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    pub fn manifest(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ReleaseError::Manifest {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// True when the release stopped because the user said no.
    pub fn is_user_abort(&self) -> bool {
        matches!(
            self,
            ReleaseError::Aborted(_) | ReleaseError::CoverageTooLow { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::config("threshold out of range");
        assert_eq!(err.to_string(), "Configuration error: threshold out of range");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_coverage_too_low_message() {
        let err = ReleaseError::CoverageTooLow {
            percent: 72,
            threshold: 80,
        };
        assert_eq!(err.to_string(), "Coverage 72% is below the 80% threshold");
    }

    #[test]
    fn test_manifest_error_names_path() {
        let err = ReleaseError::manifest("pyproject.toml", "no version line");
        assert_eq!(
            err.to_string(),
            "Manifest error in pyproject.toml: no version line"
        );
    }

    #[test]
    fn test_external_tool_message() {
        let err = ReleaseError::ExternalTool {
            program: "uv run pytest".to_string(),
            code: Some(2),
            output: String::new(),
        };
        assert_eq!(err.to_string(), "Command `uv run pytest` failed with exit code 2");

        let killed = ReleaseError::ExternalTool {
            program: "uv sync".to_string(),
            code: None,
            output: String::new(),
        };
        assert!(killed.to_string().ends_with("without an exit code"));
    }

    #[test]
    fn test_user_abort_classification() {
        assert!(ReleaseError::aborted("declined").is_user_abort());
        assert!(ReleaseError::CoverageTooLow {
            percent: 10,
            threshold: 80
        }
        .is_user_abort());
        assert!(!ReleaseError::validation("empty").is_user_abort());
        assert!(!ReleaseError::config("x").is_user_abort());
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseError::aborted("x"), "Aborted"),
            (ReleaseError::validation("x"), "Validation error"),
            (ReleaseError::config("x"), "Configuration error"),
            (ReleaseError::manifest("m", "x"), "Manifest error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
