//! Sources backed by the `.mkchangelog.d` directory
//!
//! Layout:
//!
//! ```text
//! .mkchangelog.d/
//!   versions/
//!     unreleased/commits/*.txt
//!     v1.2.0/
//!       header
//!       footer
//!       commits/*.txt
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use mkchangelog_core::config::defaults::DATA_DIR;
use mkchangelog_core::sources::split_revision_range;
use mkchangelog_core::{
    LogOptions, LogSource, MkChangelogError, Result, SectionTextSource, UNRELEASED_MARKER,
};

/// Directory name standing for the unreleased marker
pub const UNRELEASED_DIR: &str = "unreleased";

const VERSIONS_DIR: &str = "versions";
const COMMITS_DIR: &str = "commits";

fn version_dir_name(version: &str) -> &str {
    if version == UNRELEASED_MARKER {
        UNRELEASED_DIR
    } else {
        version
    }
}

/// Commit messages stored as text files, one message per file
#[derive(Debug, Clone)]
pub struct FilesLogSource {
    root: PathBuf,
}

impl FilesLogSource {
    /// Create a source reading from a data directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a source for the data directory inside `base`
    pub fn in_dir(base: &Path) -> Self {
        Self::new(base.join(DATA_DIR))
    }

    fn pattern(&self, version: Option<&str>) -> String {
        let versions = self.root.join(VERSIONS_DIR);
        let base = glob::Pattern::escape(&versions.to_string_lossy());
        let version = match version {
            Some(v) => glob::Pattern::escape(version_dir_name(v)),
            None => "*".to_string(),
        };
        format!("{}/{}/{}/*.txt", base, version, COMMITS_DIR)
    }
}

impl LogSource for FilesLogSource {
    fn name(&self) -> &'static str {
        "files"
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn get_log(&self, options: &LogOptions) -> Result<Vec<String>> {
        let version = options
            .revision_range
            .as_deref()
            .map(|range| split_revision_range(range).0);
        let pattern = self.pattern(version);

        let paths = glob::glob(&pattern)
            .map_err(|e| MkChangelogError::other(format!("invalid glob '{}': {}", pattern, e)))?;

        let mut files = Vec::new();
        for entry in paths {
            match entry {
                Ok(path) => files.push(path),
                Err(e) => warn!(error = %e, "skipping unreadable commit file"),
            }
        }
        files.sort();

        let mut messages = Vec::new();
        for path in files {
            if options.commit_limit.is_some_and(|limit| messages.len() >= limit) {
                break;
            }
            let content = std::fs::read_to_string(&path)?;
            messages.push(content.trim_matches('\n').to_string());
        }

        debug!(count = messages.len(), %pattern, "collected commit files");
        Ok(messages)
    }
}

/// Per-version header and footer files
#[derive(Debug, Clone)]
pub struct VersionsDirectory {
    root: PathBuf,
}

impl VersionsDirectory {
    /// Create a source reading from a data directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a source for the data directory inside `base`
    pub fn in_dir(base: &Path) -> Self {
        Self::new(base.join(DATA_DIR))
    }

    fn read(&self, version: &str, file: &str) -> Result<Option<String>> {
        let versions = self.root.join(VERSIONS_DIR);
        let mut path = versions.join(version_dir_name(version)).join(file);
        if !path.is_file() && version == UNRELEASED_MARKER {
            // Data written before the rename may still sit under `HEAD`
            path = versions.join(version).join(file);
        }
        if !path.is_file() {
            return Ok(None);
        }
        debug!(path = %path.display(), "reading section text");
        let content = std::fs::read_to_string(&path)?;
        Ok(Some(content.trim().to_string()))
    }
}

impl SectionTextSource for VersionsDirectory {
    fn header(&self, version: &str) -> Result<Option<String>> {
        self.read(version, "header")
    }

    fn footer(&self, version: &str) -> Result<Option<String>> {
        self.read(version, "footer")
    }
}
