//! Subcommand implementations behind the binary's argument parsing

pub mod orchestration;
pub mod passthrough;

pub use orchestration::{ReleaseOutcome, ReleaseSettings, ReleaseWorkflow};
