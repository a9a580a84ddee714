//! Commit message parsing

mod conventional;

pub use conventional::ConventionalParser;

use mkchangelog_core::ParseError;

use crate::types::CommitRecord;

/// Trait for commit message parsers
pub trait CommitParser: Send + Sync {
    /// Parse a raw commit message into a record
    fn parse(&self, message: &str) -> Result<CommitRecord, ParseError>;
}
