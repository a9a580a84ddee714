//! mkchangelog git - read-only git access for changelog generation
//!
//! This crate walks commit history and lists version tags. It never
//! creates commits or tags.

mod commits;
mod repository;
mod sources;
mod tags;

pub use repository::{GitRepo, Result};
pub use sources::{GitLogSource, GitVersionSource};

#[cfg(test)]
mod test_helpers;
