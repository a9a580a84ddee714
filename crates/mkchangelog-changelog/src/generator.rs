//! Changelog generation
//!
//! [`ChangelogGenerator::build_section`] turns one revision range into a
//! [`ChangelogSection`]; [`ChangelogGenerator::generate`] walks the release
//! history and builds one section per release.

use std::path::Path;

use tracing::{debug, info, instrument};

use mkchangelog_core::config::ALL_TYPES;
use mkchangelog_core::sources::RANGE_SEPARATOR;
use mkchangelog_core::{
    LogOptions, LogSource, Result, SectionTextSource, Settings, VersionRecord, VersionSource,
};
use mkchangelog_git::{GitLogSource, GitVersionSource};

use crate::filters::{hide_scopes, CommitFilter};
use crate::parser::{CommitParser, ConventionalParser};
use crate::sources::{FilesLogSource, VersionsDirectory};
use crate::types::{ChangeGroup, Changelog, ChangelogSection, CommitRecord};

/// Options for [`ChangelogGenerator::generate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Document title; the configured title when absent
    pub title: Option<String>,
    /// Commit types to show; `None` or a list containing `all` shows every type
    pub type_filter: Option<Vec<String>>,
    /// Add a section for changes after the newest release
    pub include_unreleased: bool,
    /// Name given to the unreleased section
    pub unreleased_label: String,
    /// Drop sections without typed changes
    pub hide_empty: bool,
    /// Maximum commits read per section
    pub commit_limit: Option<usize>,
}

impl GenerateOptions {
    /// Options taken from settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            title: Some(settings.changelog_title.clone()),
            type_filter: settings.default_type_filter(),
            include_unreleased: settings.unreleased,
            unreleased_label: settings.unreleased_version.clone(),
            hide_empty: settings.hide_empty_releases,
            commit_limit: Some(settings.commit_limit),
        }
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Parsed messages of one revision range
#[derive(Debug, Default)]
struct ParsedLog {
    records: Vec<CommitRecord>,
    informational: Vec<String>,
}

/// Changelog generator
pub struct ChangelogGenerator {
    settings: Settings,
    parser: Box<dyn CommitParser>,
    log_sources: Vec<Box<dyn LogSource>>,
    version_source: Box<dyn VersionSource>,
    text_source: Option<Box<dyn SectionTextSource>>,
    filters: Vec<CommitFilter>,
}

impl ChangelogGenerator {
    /// Create a generator without log sources, filters or section texts
    pub fn new<V: VersionSource + 'static>(settings: Settings, version_source: V) -> Result<Self> {
        let parser = ConventionalParser::new(&settings)?;
        Ok(Self {
            settings,
            parser: Box::new(parser),
            log_sources: Vec::new(),
            version_source: Box::new(version_source),
            text_source: None,
            filters: Vec::new(),
        })
    }

    /// Create a generator for a repository checkout.
    ///
    /// Reads commits from git and from `.mkchangelog.d`, releases from
    /// prefixed tags, and hides the configured scopes.
    pub fn for_repository(settings: Settings, dir: &Path) -> Result<Self> {
        let versions = GitVersionSource::new(dir, settings.tag_prefix.clone());
        let hidden = settings.hidden_scopes.clone();

        Ok(Self::new(settings, versions)?
            .with_log_source(GitLogSource::new(dir))
            .with_log_source(FilesLogSource::in_dir(dir))
            .with_text_source(VersionsDirectory::in_dir(dir))
            .with_filter(hide_scopes(hidden)))
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Add a log source; outputs of all sources are concatenated
    pub fn with_log_source<L: LogSource + 'static>(mut self, source: L) -> Self {
        self.log_sources.push(Box::new(source));
        self
    }

    /// Use a header/footer source
    pub fn with_text_source<T: SectionTextSource + 'static>(mut self, source: T) -> Self {
        self.text_source = Some(Box::new(source));
        self
    }

    /// Add a post-parse filter; filters run in registration order
    pub fn with_filter(mut self, filter: CommitFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Settings the generator was built with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Version source the generator walks
    pub fn version_source(&self) -> &dyn VersionSource {
        self.version_source.as_ref()
    }

    /// Raw messages from every log source for a revision range
    #[instrument(skip(self))]
    pub fn log_messages(
        &self,
        revision_range: Option<&str>,
        commit_limit: Option<usize>,
    ) -> Result<Vec<String>> {
        let options = LogOptions {
            commit_limit,
            revision_range: revision_range.map(String::from),
            excluded_revisions: self.settings.ignore_revs.clone(),
        };

        let mut messages = Vec::new();
        for source in &self.log_sources {
            let found = source.get_log(&options)?;
            debug!(source = source.name(), count = found.len(), "log source read");
            messages.extend(found);
        }
        Ok(messages)
    }

    /// Parse messages and run the post-parse filters
    fn parse_messages(&self, messages: &[String], strict: bool) -> Result<ParsedLog> {
        let mut parsed = ParsedLog::default();

        for message in messages {
            match self.parser.parse(message) {
                Ok(record) => parsed.records.push(record),
                Err(e) if e.is_informational() => {
                    debug!(error = %e, "informational commit");
                    parsed
                        .informational
                        .push(message.lines().next().unwrap_or_default().to_string());
                }
                Err(e) if strict => return Err(e.into()),
                Err(e) => debug!(error = %e, "skipping commit"),
            }
        }

        for filter in &self.filters {
            parsed.records = filter(std::mem::take(&mut parsed.records));
        }

        Ok(parsed)
    }

    /// Parsed records of a revision range, without type filtering
    pub fn commits(
        &self,
        revision_range: Option<&str>,
        commit_limit: Option<usize>,
    ) -> Result<Vec<CommitRecord>> {
        let messages = self.log_messages(revision_range, commit_limit)?;
        Ok(self.parse_messages(&messages, false)?.records)
    }

    /// Build the section for the changes in `from` that are not in `to`.
    ///
    /// An absent `from` stands for `HEAD`; an absent `to` makes the range
    /// unbounded.
    #[instrument(skip(self, from, to, type_filter), fields(
        from_version = from.map(|v| v.name.as_str()).unwrap_or("HEAD"),
        to_version = to.map(|v| v.name.as_str()),
    ))]
    pub fn build_section(
        &self,
        from: Option<&VersionRecord>,
        to: Option<&VersionRecord>,
        type_filter: Option<&[String]>,
        commit_limit: Option<usize>,
    ) -> Result<ChangelogSection> {
        let version = from.cloned().unwrap_or_else(VersionRecord::unreleased);
        let range = match to {
            Some(to) => format!("{}{}{}", version.name, RANGE_SEPARATOR, to.name),
            None => version.name.clone(),
        };

        let messages = self.log_messages(Some(&range), commit_limit)?;
        let parsed = self.parse_messages(&messages, self.settings.strict)?;

        let mut section = ChangelogSection::new(version);
        section.informational = parsed.informational;
        section.breaking_changes = parsed
            .records
            .iter()
            .filter(|c| c.is_breaking)
            .cloned()
            .collect();
        section.reverts = parsed
            .records
            .iter()
            .filter(|c| c.is_revert())
            .cloned()
            .collect();

        let shown: Vec<CommitRecord> = match type_filter {
            Some(types) if !types.is_empty() && !types.iter().any(|t| t == ALL_TYPES) => parsed
                .records
                .into_iter()
                .filter(|c| types.contains(&c.change_type))
                .collect(),
            _ => parsed.records,
        };
        section.changes = self.group_by_type(shown);

        if let Some(texts) = &self.text_source {
            section.header = texts.header(&section.version.name)?.unwrap_or_default();
            section.footer = texts.footer(&section.version.name)?.unwrap_or_default();
        }

        debug!(
            groups = section.changes.len(),
            reverts = section.reverts.len(),
            breaking = section.breaking_changes.len(),
            "section built"
        );
        Ok(section)
    }

    /// Group non-revert records by type in priority order
    fn group_by_type(&self, records: Vec<CommitRecord>) -> Vec<ChangeGroup> {
        let mut keyed: Vec<CommitRecord> = records.into_iter().filter(|c| !c.is_revert()).collect();
        keyed.sort_by(|a, b| a.change_type.cmp(&b.change_type));

        let mut groups: Vec<ChangeGroup> = Vec::new();
        for record in keyed {
            match groups.last_mut() {
                Some(group) if group.commit_type == record.change_type => group.commits.push(record),
                _ => {
                    let title = self.settings.display_name(&record.change_type);
                    let mut group = ChangeGroup::new(record.change_type.clone(), title);
                    group.commits.push(record);
                    groups.push(group);
                }
            }
        }

        // stable: equal priorities keep the type key order
        groups.sort_by_key(|g| std::cmp::Reverse(self.settings.priority(&g.commit_type)));

        let mut merged: Vec<ChangeGroup> = Vec::new();
        for group in groups {
            match merged.iter_mut().find(|m| m.title == group.title) {
                Some(existing) => existing.commits.extend(group.commits),
                None => merged.push(group),
            }
        }

        for group in &mut merged {
            group.commits.sort_by(|a, b| {
                a.scope
                    .as_deref()
                    .unwrap_or("")
                    .cmp(b.scope.as_deref().unwrap_or(""))
            });
        }
        merged
    }

    /// Generate the changelog for every release
    #[instrument(skip(self, options), fields(
        unreleased = options.include_unreleased,
        hide_empty = options.hide_empty,
    ))]
    pub fn generate(&self, options: &GenerateOptions) -> Result<Changelog> {
        let title = options
            .title
            .clone()
            .unwrap_or_else(|| self.settings.changelog_title.clone());
        let type_filter = options.type_filter.as_deref();

        let mut versions = Vec::new();
        if options.include_unreleased {
            versions.push(VersionRecord::unreleased());
        }
        versions.extend(self.version_source.get_versions(None)?);
        info!(version_count = versions.len(), "generating changelog");

        let mut sections = Vec::with_capacity(versions.len());
        for (i, version) in versions.iter().enumerate() {
            let older = versions.get(i + 1);
            sections.push(self.build_section(
                Some(version),
                older,
                type_filter,
                options.commit_limit,
            )?);
        }

        for section in &mut sections {
            if section.version.is_unreleased() {
                section.version.name = options.unreleased_label.clone();
            }
        }

        if options.hide_empty {
            let before = sections.len();
            sections.retain(|s| !s.is_empty());
            if sections.len() < before {
                debug!(hidden = before - sections.len(), "hid empty releases");
            }
        }

        Ok(Changelog::new(title, sections))
    }
}
