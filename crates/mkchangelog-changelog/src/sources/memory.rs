//! In-memory sources for scripting and tests

use std::collections::BTreeMap;
use std::sync::Mutex;

use mkchangelog_core::{LogOptions, LogSource, Result, VersionRecord, VersionSource};

/// Commit messages held in memory, optionally keyed by revision range
#[derive(Debug, Default)]
pub struct StaticLogSource {
    fallback: Vec<String>,
    by_range: BTreeMap<String, Vec<String>>,
    requests: Mutex<Vec<LogOptions>>,
}

impl StaticLogSource {
    /// Serve `messages` for every request
    pub fn new<S: Into<String>>(messages: impl IntoIterator<Item = S>) -> Self {
        Self {
            fallback: messages.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Serve `messages` for one exact revision range
    pub fn with_range<S: Into<String>>(
        mut self,
        range: impl Into<String>,
        messages: impl IntoIterator<Item = S>,
    ) -> Self {
        self.by_range
            .insert(range.into(), messages.into_iter().map(Into::into).collect());
        self
    }

    /// Options of every request served so far
    pub fn requests(&self) -> Vec<LogOptions> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl LogSource for StaticLogSource {
    fn name(&self) -> &'static str {
        "static"
    }

    fn get_log(&self, options: &LogOptions) -> Result<Vec<String>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(options.clone());
        }

        let messages = options
            .revision_range
            .as_ref()
            .and_then(|range| self.by_range.get(range))
            .unwrap_or(&self.fallback);

        let limit = options.commit_limit.unwrap_or(messages.len());
        Ok(messages.iter().take(limit).cloned().collect())
    }
}

/// Versions held in memory, already ordered newest first
#[derive(Debug, Clone, Default)]
pub struct StaticVersionSource {
    versions: Vec<VersionRecord>,
}

impl StaticVersionSource {
    /// Create a source from versions ordered newest first
    pub fn new(versions: Vec<VersionRecord>) -> Self {
        Self { versions }
    }
}

impl VersionSource for StaticVersionSource {
    fn get_versions(&self, limit: Option<usize>) -> Result<Vec<VersionRecord>> {
        let limit = limit.unwrap_or(self.versions.len());
        Ok(self.versions.iter().take(limit).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_log_source_ranges() {
        let source = StaticLogSource::new(["feat: a", "fix: b"]).with_range("HEAD...v1.0.0", ["fix: c"]);

        let all = source.get_log(&LogOptions::default()).unwrap();
        assert_eq!(all.len(), 2);

        let ranged = source.get_log(&LogOptions::for_range("HEAD...v1.0.0")).unwrap();
        assert_eq!(ranged, vec!["fix: c".to_string()]);

        let limited = source
            .get_log(&LogOptions::default().with_limit(Some(1)))
            .unwrap();
        assert_eq!(limited, vec!["feat: a".to_string()]);

        assert_eq!(source.requests().len(), 3);
    }

    #[test]
    fn test_static_version_source() {
        let source = StaticVersionSource::new(vec![
            VersionRecord::from_name("v", "v1.1.0").unwrap(),
            VersionRecord::from_name("v", "v1.0.0").unwrap(),
        ]);
        assert_eq!(source.get_versions(None).unwrap().len(), 2);
        assert_eq!(source.get_last_version().unwrap().unwrap().name, "v1.1.0");
    }
}
