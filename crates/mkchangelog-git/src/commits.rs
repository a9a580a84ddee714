//! Commit history operations

use git2::{Oid, Sort};
use tracing::{debug, instrument};

use mkchangelog_core::error::GitError;
use mkchangelog_core::LogOptions;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Collect raw commit messages for a revision range.
    ///
    /// `from` walks everything reachable from `from`; `from...to` walks the
    /// symmetric difference, i.e. the commits of `from` and `to` that are not
    /// reachable from their merge base. Merge commits are skipped.
    #[instrument(skip(self), fields(range = ?options.revision_range, limit = ?options.commit_limit))]
    pub fn log_messages(&self, options: &LogOptions) -> Result<Vec<String>> {
        if self.is_empty()? {
            debug!("repository has no commits");
            return Ok(Vec::new());
        }

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        match options.range_bounds() {
            None => revwalk.push_head()?,
            Some((from, None)) => revwalk.push(self.resolve(from)?)?,
            Some((from, Some(to))) => {
                let from = self.resolve(from)?;
                let to = self.resolve(to)?;
                revwalk.push(from)?;
                revwalk.push(to)?;
                match self.repo.merge_base(from, to) {
                    Ok(base) => revwalk.hide(base)?,
                    Err(e) if e.code() == git2::ErrorCode::NotFound => {}
                    Err(e) => return Err(GitError::Git2(e)),
                }
            }
        }

        let excluded: Vec<&str> = options
            .excluded_revisions
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .collect();

        let mut messages = Vec::new();
        for oid in revwalk {
            if options.commit_limit.is_some_and(|limit| messages.len() >= limit) {
                break;
            }

            let oid = oid?;
            if is_excluded(oid, &excluded) {
                debug!(%oid, "skipping excluded revision");
                continue;
            }

            let commit = self.repo.find_commit(oid)?;
            if commit.parent_count() > 1 {
                continue;
            }
            messages.push(String::from_utf8_lossy(commit.message_bytes()).into_owned());
        }

        debug!(count = messages.len(), "collected commit messages");
        Ok(messages)
    }
}

/// Excluded revisions may be abbreviated hashes
fn is_excluded(oid: Oid, excluded: &[&str]) -> bool {
    if excluded.is_empty() {
        return false;
    }
    let sha = oid.to_string();
    excluded.iter().any(|rev| sha.starts_with(rev))
}
