//! Git repository access

use std::path::{Path, PathBuf};

use git2::{Oid, Repository};
use tracing::{debug, instrument};

use mkchangelog_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Git repository wrapper
pub struct GitRepo {
    pub(crate) repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository whose work tree is `path`
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::open(path)
            .map_err(|e| open_error(e, GitError::RepositoryNotFound(path.to_path_buf())))?;
        debug!("opened repository");
        Ok(Self::wrap(repo))
    }

    /// Open the repository containing `start_path`
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        let repo = Repository::discover(start_path)
            .map_err(|e| open_error(e, GitError::NotARepository(start_path.to_path_buf())))?;
        debug!(git_dir = %repo.path().display(), "discovered repository");
        Ok(Self::wrap(repo))
    }

    fn wrap(repo: Repository) -> Self {
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        Self { repo, path }
    }

    /// Work tree root, or the git dir of a bare repository
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the repository has no commits yet
    pub fn is_empty(&self) -> Result<bool> {
        self.repo.is_empty().map_err(GitError::Git2)
    }

    /// Resolve a revision (tag, branch, hash, `HEAD`) to a commit id
    pub fn resolve(&self, revision: &str) -> Result<Oid> {
        self.repo
            .revparse_single(revision)
            .and_then(|object| object.peel_to_commit())
            .map(|commit| commit.id())
            .map_err(|_| GitError::InvalidRevision(revision.to_string()))
    }
}

/// `not_found` when git reports a missing repository, `OpenFailed` otherwise
fn open_error(e: git2::Error, not_found: GitError) -> GitError {
    if e.code() == git2::ErrorCode::NotFound {
        not_found
    } else {
        GitError::OpenFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_empty_repo() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let repo = GitRepo::open(temp.path()).unwrap();
        assert!(repo.is_empty().unwrap());
    }

    #[test]
    fn test_discover_repo() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();

        let subdir = temp.path().join("sub").join("dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let repo = GitRepo::discover(&subdir).unwrap();
        assert_eq!(
            repo.path().canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_not_a_repo() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            GitRepo::open(temp.path()),
            Err(GitError::RepositoryNotFound(_))
        ));
    }

    #[test]
    fn test_resolve_unknown_revision() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let repo = GitRepo::open(temp.path()).unwrap();
        assert!(matches!(
            repo.resolve("v9.9.9"),
            Err(GitError::InvalidRevision(_))
        ));
    }
}
