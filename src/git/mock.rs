use crate::domain::FileChange;
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// A mutating call observed by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    StageAll,
    StagePath(PathBuf),
    Commit(String),
    CreateTag(String),
    PushBranch { remote: String, branch: String },
    PushTag { remote: String, tag: String },
}

/// Mock repository for testing without actual git operations
///
/// Records every mutating call in order so tests can assert on exactly what
/// the workflow did to history.
pub struct MockRepository {
    changes: RefCell<Vec<FileChange>>,
    branch: Option<String>,
    tags: RefCell<HashSet<String>>,
    calls: RefCell<Vec<GitCall>>,
    failing_push: Option<String>,
    missing_remote: Option<String>,
}

impl MockRepository {
    /// Create a clean repository on `main`
    pub fn new() -> Self {
        MockRepository {
            changes: RefCell::new(Vec::new()),
            branch: Some("main".to_string()),
            tags: RefCell::new(HashSet::new()),
            calls: RefCell::new(Vec::new()),
            failing_push: None,
            missing_remote: None,
        }
    }

    /// Pending changes reported by `status`
    pub fn with_changes(self, changes: Vec<FileChange>) -> Self {
        *self.changes.borrow_mut() = changes;
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// Simulate a detached HEAD
    pub fn detached(mut self) -> Self {
        self.branch = None;
        self
    }

    pub fn with_tag(self, name: impl Into<String>) -> Self {
        self.tags.borrow_mut().insert(name.into());
        self
    }

    /// Make pushes of the given ref name fail
    pub fn failing_push(mut self, ref_name: impl Into<String>) -> Self {
        self.failing_push = Some(ref_name.into());
        self
    }

    /// Report `name` as an unknown remote
    pub fn without_remote(mut self, name: impl Into<String>) -> Self {
        self.missing_remote = Some(name.into());
        self
    }

    /// Mutating calls in the order they happened
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: GitCall) {
        self.calls.borrow_mut().push(call);
    }

    fn check_push(&self, name: &str) -> Result<()> {
        match &self.failing_push {
            Some(failing) if failing == name => Err(ReleaseError::Git(git2::Error::from_str(
                &format!("Push failed for {}", name),
            ))),
            _ => Ok(()),
        }
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn status(&self) -> Result<Vec<FileChange>> {
        Ok(self.changes.borrow().clone())
    }

    fn current_branch(&self) -> Result<String> {
        self.branch
            .clone()
            .ok_or_else(|| ReleaseError::validation("HEAD is detached"))
    }

    fn stage_all(&self) -> Result<()> {
        self.record(GitCall::StageAll);
        Ok(())
    }

    fn stage_path(&self, path: &Path) -> Result<()> {
        self.record(GitCall::StagePath(path.to_path_buf()));
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<String> {
        self.record(GitCall::Commit(message.to_string()));
        self.changes.borrow_mut().clear();
        Ok(format!("{:040x}", self.calls.borrow().len()))
    }

    fn preflight(&self, remote: &str) -> Result<()> {
        match &self.missing_remote {
            Some(missing) if missing == remote => Err(ReleaseError::validation(format!(
                "No remote named '{}' found",
                remote
            ))),
            _ => Ok(()),
        }
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        Ok(self.tags.borrow().contains(name))
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        if !self.tags.borrow_mut().insert(name.to_string()) {
            return Err(ReleaseError::Git(git2::Error::from_str(&format!(
                "tag '{}' already exists",
                name
            ))));
        }
        self.record(GitCall::CreateTag(name.to_string()));
        Ok(())
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.check_push(branch)?;
        self.record(GitCall::PushBranch {
            remote: remote.to_string(),
            branch: branch.to_string(),
        });
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.check_push(tag)?;
        self.record(GitCall::PushTag {
            remote: remote.to_string(),
            tag: tag.to_string(),
        });
        Ok(())
    }
}
