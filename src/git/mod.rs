//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the version-control
//! operations a release needs, so the workflow can run against a real
//! repository or an in-memory mock.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A recording mock for testing
//!
//! ```rust
//! # use git_release::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> git_release::Result<()> {
//! if repo.status()?.is_empty() {
//!     println!("working tree clean on {}", repo.current_branch()?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{GitCall, MockRepository};
pub use repository::Git2Repository;

use std::path::Path;

use crate::domain::FileChange;
use crate::error::Result;

/// Version-control operations used by the release workflow
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// underlying errors (like `git2::Error`) to [crate::error::ReleaseError].
pub trait Repository {
    /// Uncommitted changes in the working tree and index.
    ///
    /// Untracked files are included, ignored files are not. An empty list
    /// means the working directory is clean.
    fn status(&self) -> Result<Vec<FileChange>>;

    /// Short name of the checked-out branch.
    ///
    /// # Returns
    /// * `Ok(String)` - Branch name (e.g., "main")
    /// * `Err` - If HEAD is detached or unborn
    fn current_branch(&self) -> Result<String>;

    /// Stage every change, including deletions and untracked files.
    fn stage_all(&self) -> Result<()>;

    /// Stage a single file.
    ///
    /// # Arguments
    /// * `path` - Path to the file, absolute or relative to the process working directory
    fn stage_path(&self, path: &Path) -> Result<()>;

    /// Commit the index on top of HEAD.
    ///
    /// # Returns
    /// * `Ok(String)` - Hash of the new commit
    fn commit(&self, message: &str) -> Result<String>;

    /// Check that a commit can be authored and `remote` exists.
    ///
    /// Runs before the manifest is rewritten so a missing `user.name` or
    /// remote fails the release with nothing changed on disk.
    fn preflight(&self, remote: &str) -> Result<()>;

    /// Whether a tag with this exact name exists.
    fn tag_exists(&self, name: &str) -> Result<bool>;

    /// Create a lightweight tag on HEAD.
    ///
    /// Fails if the tag already exists.
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Push a local branch to the same-named branch on `remote`.
    fn push_branch(&self, remote: &str, branch: &str) -> Result<()>;

    /// Push a tag to `remote`.
    fn push_tag(&self, remote: &str, tag: &str) -> Result<()>;
}
