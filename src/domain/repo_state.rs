use std::fmt;

/// How a path differs from HEAD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
    TypeChange,
    Untracked,
    Conflicted,
}

impl ChangeKind {
    /// Short code in the style of `git status --short`
    pub fn code(&self) -> &'static str {
        match self {
            ChangeKind::Added => "A",
            ChangeKind::Modified => "M",
            ChangeKind::Deleted => "D",
            ChangeKind::Renamed => "R",
            ChangeKind::TypeChange => "T",
            ChangeKind::Untracked => "??",
            ChangeKind::Conflicted => "U",
        }
    }
}

/// One entry of the working-tree status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: String,
    pub kind: ChangeKind,
}

impl FileChange {
    pub fn new(path: impl Into<String>, kind: ChangeKind) -> Self {
        FileChange {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for FileChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>2} {}", self.kind.code(), self.path)
    }
}

/// Snapshot of the repository taken at the start of a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoState {
    pub changes: Vec<FileChange>,
    pub branch: String,
}

impl RepoState {
    pub fn is_clean(&self) -> bool {
        self.changes.is_empty()
    }
}
