//! Reading and rewriting the `version = "X.Y.Z"` line of a project manifest.
//!
//! Only the quoted value of the first matching line changes. Every other byte,
//! line endings included, is written back untouched.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::domain::Version;
use crate::error::{ReleaseError, Result};

fn version_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^version[ \t]*=[ \t]*"(\d+\.\d+\.\d+)"[ \t]*(?:#[^\r\n]*)?\r?$"#)
            .expect("version line pattern is valid")
    })
}

/// A manifest file with its version line located
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    content: String,
    value_span: Range<usize>,
    version: Version,
}

impl Manifest {
    /// Read the manifest and locate its version line.
    ///
    /// # Returns
    /// * `Ok(Manifest)` - File read and version parsed
    /// * `Err(ReleaseError::Manifest)` - File unreadable or no version line
    /// * `Err(ReleaseError::Validation)` - Version number out of range or zero-padded
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ReleaseError::manifest(path, format!("cannot read file: {}", e)))?;

        Self::from_content(path, content)
    }

    /// Locate the version line in already-loaded content.
    pub fn from_content(path: impl Into<PathBuf>, content: String) -> Result<Self> {
        let path = path.into();

        let value = version_line()
            .captures(&content)
            .and_then(|captures| captures.get(1))
            .ok_or_else(|| {
                ReleaseError::manifest(&path, "no line of the form `version = \"X.Y.Z\"` found")
            })?;

        let value_span = value.range();
        let version: Version = value.as_str().parse()?;
        debug!(
            "found version {} in {} at byte {}",
            version,
            path.display(),
            value_span.start
        );

        Ok(Manifest {
            path,
            content,
            value_span,
            version,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// File contents with the version value replaced
    pub fn render(&self, new_version: &Version) -> String {
        let mut rendered = String::with_capacity(self.content.len() + 8);
        rendered.push_str(&self.content[..self.value_span.start]);
        rendered.push_str(&new_version.to_string());
        rendered.push_str(&self.content[self.value_span.end..]);
        rendered
    }

    /// Rewrite the file in place with `new_version`.
    pub fn write_version(&self, new_version: &Version) -> Result<()> {
        fs::write(&self.path, self.render(new_version)).map_err(|e| {
            ReleaseError::manifest(&self.path, format!("cannot write file: {}", e))
        })?;
        debug!(
            "rewrote {} from {} to {}",
            self.path.display(),
            self.version,
            new_version
        );
        Ok(())
    }
}
