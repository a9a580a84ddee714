//! mkchangelog changelog - turns commit history into changelog documents
//!
//! The pipeline parses conventional commit messages, groups them per
//! release into [`ChangelogSection`]s, and renders the resulting
//! [`Changelog`] with one of the [`formatter`] renderers.

pub mod filters;
pub mod formatter;
pub mod generator;
pub mod parser;
pub mod sources;
pub mod types;
pub mod version;

pub use filters::{hide_scopes, CommitFilter};
pub use formatter::{ChangelogRenderer, RendererRegistry};
pub use generator::{ChangelogGenerator, GenerateOptions};
pub use parser::{CommitParser, ConventionalParser};
pub use types::{ChangeGroup, Changelog, ChangelogSection, CommitRecord};
pub use version::{next_version, BumpType};
