//! Error types for mkchangelog

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using MkChangelogError
pub type Result<T> = std::result::Result<T, MkChangelogError>;

/// Main error type for mkchangelog operations
#[derive(Debug, Error)]
pub enum MkChangelogError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Commit message parsing errors (only surfaced in strict mode)
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Renderer-related errors
    #[error(transparent)]
    Render(#[from] RenderError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl MkChangelogError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Revision could not be resolved
    #[error("Unknown revision: {0}")]
    InvalidRevision(String),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Kind of a first line that is recognized but carries no change type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InformationalKind {
    /// "Initial commit" line
    InitialCommit,
    /// "Merge ..." header produced by git
    Merge,
}

impl fmt::Display for InformationalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitialCommit => write!(f, "initial commit"),
            Self::Merge => write!(f, "merge"),
        }
    }
}

/// Commit message parsing outcomes other than a conventional record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// First line does not follow the conventional commit grammar
    #[error("Invalid commit: {0}")]
    Malformed(String),

    /// First line has the `type: summary` shape but the type is not configured
    #[error("Unknown commit type '{commit_type}': {line}")]
    UnknownType { commit_type: String, line: String },

    /// Recognized informational line (initial or merge commit)
    #[error("Informational {kind} commit: {line}")]
    Informational { kind: InformationalKind, line: String },
}

impl ParseError {
    /// Informational lines are not failures and are never escalated by strict mode
    pub fn is_informational(&self) -> bool {
        matches!(self, Self::Informational { .. })
    }
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Version name is not a semantic version once the prefix is stripped
    #[error("Invalid version string '{version}': {reason}")]
    InvalidVersionString { version: String, reason: String },

    /// Bumping would overflow a version component
    #[error("Version {version} cannot be bumped further")]
    Overflow { version: String },
}

/// Renderer-related errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// No built-in renderer and no template file with that name
    #[error("Unknown renderer: {0}")]
    UnknownRenderer(String),

    /// Template loading or rendering failed
    #[error("Template error: {0}")]
    Template(String),

    /// JSON rendering failed
    #[error("JSON rendering failed: {0}")]
    Json(#[from] serde_json::Error),
}
