//! Log, version and section text sources that do not need git

mod files;
mod memory;

pub use files::{FilesLogSource, VersionsDirectory, UNRELEASED_DIR};
pub use memory::{StaticLogSource, StaticVersionSource};
