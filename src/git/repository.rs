use crate::domain::{ChangeKind, FileChange};
use crate::error::{ReleaseError, Result};
use git2::{Commit, IndexAddOption, Repository as Git2Repo, Status, StatusOptions};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    fn workdir(&self) -> Result<&Path> {
        self.repo
            .workdir()
            .ok_or_else(|| ReleaseError::validation("bare repository has no working tree"))
    }

    /// Converts a path to the repository-relative form the index expects.
    fn index_path(&self, path: &Path) -> Result<PathBuf> {
        let root = fs::canonicalize(self.workdir()?)?;
        let absolute = fs::canonicalize(path)?;

        absolute
            .strip_prefix(&root)
            .map(Path::to_path_buf)
            .map_err(|_| {
                ReleaseError::validation(format!(
                    "{} is outside the repository at {}",
                    path.display(),
                    root.display()
                ))
            })
    }

    fn head_commit(&self) -> Result<Option<Commit<'_>>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?)),
            Err(e)
                if e.code() == git2::ErrorCode::UnbornBranch
                    || e.code() == git2::ErrorCode::NotFound =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn push_refspec(&self, remote_name: &str, refspec: &str) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|_| {
            ReleaseError::validation(format!("No remote named '{}' found", remote_name))
        })?;

        let mut callbacks = remote_callbacks();

        // libgit2 reports per-reference rejections here rather than via push()
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                warn!("could not update reference {}: {}", refname, status);
                Err(git2::Error::from_str(&format!(
                    "Push rejected for {}: {}",
                    refname, status
                )))
            } else {
                Ok(())
            }
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        debug!("pushing {} to {}", refspec, remote_name);
        remote
            .push(&[refspec], Some(&mut push_options))
            .map_err(|e| {
                let context = if e.class() == git2::ErrorClass::Net {
                    "Network error during push"
                } else if e.class() == git2::ErrorClass::Reference {
                    "Reference error during push"
                } else {
                    "Push failed"
                };
                ReleaseError::Git(git2::Error::from_str(&format!(
                    "{} of {} to '{}': {}",
                    context,
                    refspec,
                    remote_name,
                    e.message()
                )))
            })
    }
}

/// Credentials via SSH keys from ~/.ssh, then the SSH agent, then defaults.
fn remote_callbacks<'a>() -> git2::RemoteCallbacks<'a> {
    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, allowed_types| {
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            if let Some(ssh_dir) = dirs::home_dir().map(|home| home.join(".ssh")) {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = ssh_dir.join(key);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        git2::Cred::default()
    });
    callbacks
}

fn change_kind(status: Status) -> ChangeKind {
    if status.is_conflicted() {
        ChangeKind::Conflicted
    } else if status.is_wt_new() && !status.is_index_new() {
        ChangeKind::Untracked
    } else if status.is_index_new() {
        ChangeKind::Added
    } else if status.is_index_deleted() || status.is_wt_deleted() {
        ChangeKind::Deleted
    } else if status.is_index_renamed() || status.is_wt_renamed() {
        ChangeKind::Renamed
    } else if status.is_index_typechange() || status.is_wt_typechange() {
        ChangeKind::TypeChange
    } else {
        ChangeKind::Modified
    }
}

impl super::Repository for Git2Repository {
    fn status(&self) -> Result<Vec<FileChange>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut options))?;

        let changes: Vec<FileChange> = statuses
            .iter()
            .filter(|entry| !entry.status().is_ignored())
            .map(|entry| {
                let path = entry
                    .path()
                    .map(str::to_string)
                    .unwrap_or_else(|| String::from_utf8_lossy(entry.path_bytes()).into_owned());
                FileChange::new(path, change_kind(entry.status()))
            })
            .collect();

        debug!("status reports {} changed paths", changes.len());
        Ok(changes)
    }

    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head().map_err(|e| {
            if e.code() == git2::ErrorCode::UnbornBranch {
                ReleaseError::validation("current branch has no commits yet")
            } else {
                ReleaseError::Git(e)
            }
        })?;

        if !head.is_branch() {
            return Err(ReleaseError::validation(
                "HEAD is detached; check out a branch before releasing",
            ));
        }

        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| ReleaseError::validation("branch name is not valid UTF-8"))
    }

    fn stage_all(&self) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
        // add_all does not record removals
        index.update_all(["*"], None)?;
        index.write()?;
        Ok(())
    }

    fn stage_path(&self, path: &Path) -> Result<()> {
        let relative = self.index_path(path)?;
        let mut index = self.repo.index()?;
        index.add_path(&relative)?;
        index.write()?;
        debug!("staged {}", relative.display());
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<String> {
        let mut index = self.repo.index()?;
        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;

        let parent = self.head_commit()?;
        let parents: Vec<&Commit<'_>> = parent.iter().collect();

        let oid = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        debug!("created commit {}", oid);
        Ok(oid.to_string())
    }

    fn preflight(&self, remote: &str) -> Result<()> {
        self.repo.signature().map_err(|e| {
            ReleaseError::validation(format!(
                "cannot author commits, set git user.name and user.email: {}",
                e.message()
            ))
        })?;
        self.repo.find_remote(remote).map_err(|_| {
            ReleaseError::validation(format!("No remote named '{}' found", remote))
        })?;
        Ok(())
    }

    fn tag_exists(&self, name: &str) -> Result<bool> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo
            .tag_lightweight(name, head.as_object(), false)
            .map_err(|e| {
                ReleaseError::Git(git2::Error::from_str(&format!(
                    "Cannot create tag '{}': {}",
                    name,
                    e.message()
                )))
            })?;
        Ok(())
    }

    fn push_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.push_refspec(
            remote,
            &format!("refs/heads/{}:refs/heads/{}", branch, branch),
        )
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.push_refspec(remote, &format!("refs/tags/{}:refs/tags/{}", tag, tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_kind_mapping() {
        assert_eq!(change_kind(Status::WT_NEW), ChangeKind::Untracked);
        assert_eq!(change_kind(Status::INDEX_NEW), ChangeKind::Added);
        assert_eq!(
            change_kind(Status::INDEX_NEW | Status::WT_MODIFIED),
            ChangeKind::Added
        );
        assert_eq!(change_kind(Status::WT_MODIFIED), ChangeKind::Modified);
        assert_eq!(change_kind(Status::WT_DELETED), ChangeKind::Deleted);
        assert_eq!(change_kind(Status::INDEX_RENAMED), ChangeKind::Renamed);
        assert_eq!(change_kind(Status::CONFLICTED), ChangeKind::Conflicted);
    }

    #[test]
    fn test_open_outside_repository_fails() {
        let dir = tempfile::tempdir().unwrap();
        // A fresh temp dir is not inside any repository unless TMPDIR is
        if Git2Repo::discover(dir.path()).is_err() {
            assert!(Git2Repository::open(dir.path()).is_err());
        }
    }
}
