//! Tag operations

use chrono::{TimeZone, Utc};
use tracing::{debug, instrument, warn};

use mkchangelog_core::{parse_semantic_version, VersionRecord};

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// List version tags carrying `prefix`, newest tagged commit first.
    ///
    /// Tags whose name is not a semantic version after the prefix are skipped.
    #[instrument(skip(self))]
    pub fn version_tags(&self, prefix: &str) -> Result<Vec<VersionRecord>> {
        let names = self.repo.tag_names(None)?;
        let mut versions = Vec::new();

        for name in names.iter().flatten() {
            if !name.starts_with(prefix) {
                continue;
            }

            let semantic_version = match parse_semantic_version(prefix, name) {
                Ok(version) => version,
                Err(e) => {
                    warn!(tag = name, error = %e, "skipping tag that is not a version");
                    continue;
                }
            };

            let commit = self
                .repo
                .find_reference(&format!("refs/tags/{}", name))?
                .peel_to_commit()?;
            let date = Utc
                .timestamp_opt(commit.author().when().seconds(), 0)
                .single()
                .unwrap_or_else(Utc::now);

            versions.push(VersionRecord::new(name, date, Some(semantic_version)));
        }

        versions.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.semantic_version.cmp(&a.semantic_version))
        });

        debug!(count = versions.len(), prefix, "listed version tags");
        Ok(versions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{commit_at, init_repo, tag};

    #[test]
    fn test_version_tags_sorted_newest_first() {
        let (temp, raw) = init_repo();
        let first = commit_at(&raw, "feat: one", 1_000);
        tag(&raw, "v1.0.0", first);
        let second = commit_at(&raw, "feat: two", 2_000);
        tag(&raw, "v1.1.0", second);
        let third = commit_at(&raw, "fix: three", 3_000);
        tag(&raw, "v1.1.1", third);

        let repo = GitRepo::open(temp.path()).unwrap();
        let versions = repo.version_tags("v").unwrap();
        let names: Vec<&str> = versions.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["v1.1.1", "v1.1.0", "v1.0.0"]);
        assert_eq!(versions[0].date.timestamp(), 3_000);
    }

    #[test]
    fn test_version_tags_filters_prefix_and_invalid() {
        let (temp, raw) = init_repo();
        let first = commit_at(&raw, "feat: one", 1_000);
        tag(&raw, "v1.0.0", first);
        tag(&raw, "release-2.0.0", first);
        tag(&raw, "vnext", first);

        let repo = GitRepo::open(temp.path()).unwrap();
        let versions = repo.version_tags("v").unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].name, "v1.0.0");
    }

    #[test]
    fn test_same_commit_tags_order_by_version() {
        let (temp, raw) = init_repo();
        let first = commit_at(&raw, "feat: one", 1_000);
        tag(&raw, "v1.0.0", first);
        tag(&raw, "v1.0.1", first);

        let repo = GitRepo::open(temp.path()).unwrap();
        let versions = repo.version_tags("v").unwrap();
        assert_eq!(versions[0].name, "v1.0.1");
    }
}
