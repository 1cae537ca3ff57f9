//! Domain logic - pure release rules independent of git and subprocesses

pub mod coverage;
pub mod repo_state;
pub mod version;

pub use coverage::CoverageReport;
pub use repo_state::{ChangeKind, FileChange, RepoState};
pub use version::{BumpKind, Version};
