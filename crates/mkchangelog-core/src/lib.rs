//! mkchangelog core - shared foundation for changelog generation
//!
//! This crate provides the error taxonomy, the [`Settings`] configuration
//! bag, version records and the source traits that the changelog pipeline
//! consumes.

pub mod config;
pub mod error;
pub mod sources;
pub mod types;

pub use config::Settings;
pub use error::{
    ConfigError, GitError, InformationalKind, MkChangelogError, ParseError, RenderError, Result,
    VersionError,
};
pub use sources::{LogOptions, LogSource, SectionTextSource, VersionSource};
pub use types::{parse_semantic_version, VersionRecord, UNRELEASED_MARKER};
