//! Release workflow orchestration
//!
//! Runs the release as a strict sequence: working-tree check, tests with
//! coverage, version bump, manifest rewrite, commit and tag, push. Each step
//! starts only after the previous one succeeded or was confirmed. Checks that
//! can fail without side effects (detached HEAD, unreadable manifest, tag
//! collision, missing committer identity or remote) run before the manifest
//! is rewritten.

use std::path::{Path, PathBuf};

use log::debug;

use crate::boundary::ReleaseWarning;
use crate::config::Config;
use crate::domain::{BumpKind, CoverageReport, RepoState, Version};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use crate::manifest::Manifest;
use crate::tools::{display_command, ToolRunner};
use crate::ui::{self, Prompter};

/// Inputs of the release workflow that come from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSettings {
    /// Manifest holding the `version = "X.Y.Z"` line
    pub manifest: PathBuf,

    /// Remote the branch and tag are pushed to
    pub remote: String,

    /// Coverage below this needs confirmation
    pub coverage_threshold: u32,

    /// Test command run with coverage instrumentation
    pub coverage_command: Vec<String>,
}

impl ReleaseSettings {
    /// Settings from a loaded config; a relative manifest path resolves against `base_dir`.
    pub fn from_config(config: &Config, base_dir: &Path) -> Self {
        ReleaseSettings {
            manifest: base_dir.join(&config.manifest),
            remote: config.remote.clone(),
            coverage_threshold: config.coverage.threshold,
            coverage_command: config.commands.coverage.clone(),
        }
    }
}

/// Result of a successful release
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    /// Version found in the manifest before the bump
    pub previous: Version,

    /// Version written, committed and tagged
    pub version: Version,

    /// Tag created and pushed (the bare version string)
    pub tag: String,

    /// Branch that was pushed
    pub branch: String,

    /// Remote pushed to
    pub remote: String,

    /// Coverage total, if the test output had one
    pub coverage: Option<CoverageReport>,

    /// Whether pending changes were committed at the user's request
    pub committed_pending: bool,
}

/// Drives one release against injected git, tool and prompt implementations
pub struct ReleaseWorkflow<'a, R, T, P> {
    repo: &'a R,
    tools: &'a T,
    prompter: &'a P,
    settings: ReleaseSettings,
}

impl<'a, R, T, P> ReleaseWorkflow<'a, R, T, P>
where
    R: Repository,
    T: ToolRunner,
    P: Prompter,
{
    pub fn new(repo: &'a R, tools: &'a T, prompter: &'a P, settings: ReleaseSettings) -> Self {
        ReleaseWorkflow {
            repo,
            tools,
            prompter,
            settings,
        }
    }

    /// Run the whole release, bumping by `kind`.
    ///
    /// # Returns
    /// * `Ok(ReleaseOutcome)` - Commit, tag and both pushes succeeded
    /// * `Err(ReleaseError::Aborted)` - User declined to commit pending changes
    /// * `Err(ReleaseError::CoverageTooLow)` - User declined to release under threshold
    /// * `Err(_)` - Validation, manifest, tool or git failure
    pub fn run(&self, kind: BumpKind) -> Result<ReleaseOutcome> {
        let (state, committed_pending) = self.prepare_working_tree()?;
        let coverage = self.run_tests()?;

        let manifest = Manifest::load(&self.settings.manifest)?;
        let previous = manifest.version();
        let version = previous.bump(kind)?;
        let tag = version.to_string();
        debug!("{} bump: {} -> {}", kind, previous, version);

        self.repo.preflight(&self.settings.remote)?;
        if self.repo.tag_exists(&tag)? {
            return Err(ReleaseError::validation(format!(
                "Tag '{}' already exists",
                tag
            )));
        }

        ui::display_version_change(&previous, &version);

        ui::display_status(&format!("Updating {}", manifest.path().display()));
        manifest.write_version(&version)?;

        self.commit_and_tag(manifest.path(), &version, &tag)?;
        self.publish(&state.branch, &tag)?;

        Ok(ReleaseOutcome {
            previous,
            version,
            tag,
            branch: state.branch,
            remote: self.settings.remote.clone(),
            coverage,
            committed_pending,
        })
    }

    /// Step 1: require a clean tree, offering to commit whatever is pending.
    fn prepare_working_tree(&self) -> Result<(RepoState, bool)> {
        ui::display_status("Checking working directory...");

        let state = RepoState {
            changes: self.repo.status()?,
            branch: self.repo.current_branch()?,
        };

        if state.is_clean() {
            ui::display_success(&format!("Working directory clean on '{}'", state.branch));
            return Ok((state, false));
        }

        ui::display_warning(&ReleaseWarning::DirtyWorkingTree {
            changes: state.changes.clone(),
        });

        if !self
            .prompter
            .confirm("Stage and commit all changes before releasing?")?
        {
            return Err(ReleaseError::aborted(
                "working directory has uncommitted changes",
            ));
        }

        let message = self.prompter.input("Commit message")?;
        if message.is_empty() {
            return Err(ReleaseError::validation("commit message must not be empty"));
        }

        self.repo.stage_all()?;
        let hash = self.repo.commit(&message)?;
        ui::display_success(&format!(
            "Committed pending changes ({})",
            &hash[..hash.len().min(7)]
        ));

        Ok((state, true))
    }

    /// Step 2: run tests with coverage and gate on the threshold.
    fn run_tests(&self) -> Result<Option<CoverageReport>> {
        let command = &self.settings.coverage_command;
        let threshold = self.settings.coverage_threshold;

        ui::display_status(&format!(
            "Running tests with coverage: {}",
            display_command(command)
        ));
        let output = self.tools.capture(command)?.into_result(command)?;
        ui::display_success("Tests passed");

        let report = CoverageReport::parse(&output);
        ui::display_coverage(report.as_ref(), threshold);

        match report {
            None => ui::display_warning(&ReleaseWarning::CoverageUnavailable),
            Some(report) if report.is_below(threshold) => {
                ui::display_warning(&ReleaseWarning::CoverageBelowThreshold {
                    percent: report.percent,
                    threshold,
                });
                if !self.prompter.confirm("Continue the release anyway?")? {
                    return Err(ReleaseError::CoverageTooLow {
                        percent: report.percent,
                        threshold,
                    });
                }
            }
            Some(_) => {}
        }

        Ok(report)
    }

    /// Step 5: commit the manifest and tag the commit.
    fn commit_and_tag(&self, manifest: &Path, version: &Version, tag: &str) -> Result<()> {
        self.repo.stage_path(manifest)?;
        self.repo.commit(&format!("Bump version to {}", version))?;
        ui::display_success(&format!("Committed version bump to {}", version));

        self.repo.create_tag(tag)?;
        ui::display_success(&format!("Created tag: {}", tag));
        Ok(())
    }

    /// Step 6: push the branch, then the tag.
    fn publish(&self, branch: &str, tag: &str) -> Result<()> {
        let remote = &self.settings.remote;

        ui::display_status(&format!("Pushing branch '{}' to {}", branch, remote));
        self.repo.push_branch(remote, branch)?;

        ui::display_status(&format!("Pushing tag '{}' to {}", tag, remote));
        self.repo.push_tag(remote, tag)?;

        ui::display_success(&format!("Pushed {} and {} to {}", branch, tag, remote));
        Ok(())
    }
}
