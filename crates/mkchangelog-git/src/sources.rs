//! Git-backed log and version sources

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use mkchangelog_core::{LogOptions, LogSource, Result, VersionRecord, VersionSource};

use crate::repository::GitRepo;

/// Commit messages read from a git repository
#[derive(Debug, Clone)]
pub struct GitLogSource {
    path: PathBuf,
}

impl GitLogSource {
    /// Create a source for the repository containing `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path the repository is discovered from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSource for GitLogSource {
    fn name(&self) -> &'static str {
        "git"
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn get_log(&self, options: &LogOptions) -> Result<Vec<String>> {
        let repo = GitRepo::discover(&self.path)?;
        Ok(repo.log_messages(options)?)
    }
}

/// Release versions read from prefixed git tags
#[derive(Debug, Clone)]
pub struct GitVersionSource {
    path: PathBuf,
    tag_prefix: String,
}

impl GitVersionSource {
    /// Create a source for the repository containing `path`
    pub fn new(path: impl Into<PathBuf>, tag_prefix: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            tag_prefix: tag_prefix.into(),
        }
    }

    /// Tag prefix versions are matched with
    pub fn tag_prefix(&self) -> &str {
        &self.tag_prefix
    }
}

impl VersionSource for GitVersionSource {
    #[instrument(skip(self), fields(prefix = %self.tag_prefix))]
    fn get_versions(&self, limit: Option<usize>) -> Result<Vec<VersionRecord>> {
        let repo = GitRepo::discover(&self.path)?;
        let mut versions = repo.version_tags(&self.tag_prefix)?;
        if let Some(limit) = limit {
            versions.truncate(limit);
        }
        debug!(count = versions.len(), "git versions resolved");
        Ok(versions)
    }
}
