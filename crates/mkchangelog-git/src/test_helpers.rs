//! Fixtures for tests that need a real repository

use std::path::Path;

use git2::{Oid, Repository, Signature, Time};
use tempfile::TempDir;

/// Create an empty repository in a temporary directory
pub(crate) fn init_repo() -> (TempDir, Repository) {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path()).unwrap();
    (temp, repo)
}

/// Commit a new file on HEAD with the given message and author time
pub(crate) fn commit_at(repo: &Repository, message: &str, seconds: i64) -> Oid {
    let workdir = repo.workdir().unwrap().to_path_buf();
    let file_name = format!("file-{}.txt", seconds);
    std::fs::write(workdir.join(&file_name), message).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(&file_name)).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let sig = Signature::new("Test", "test@example.com", &Time::new(seconds, 0)).unwrap();
    let parents: Vec<git2::Commit<'_>> = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().unwrap()],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .unwrap()
}

/// Create a merge commit on HEAD joining `other` without changing the tree
pub(crate) fn merge_at(repo: &Repository, other: Oid, message: &str, seconds: i64) -> Oid {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    let other = repo.find_commit(other).unwrap();
    let tree = head.tree().unwrap();
    let sig = Signature::new("Test", "test@example.com", &Time::new(seconds, 0)).unwrap();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &[&head, &other])
        .unwrap()
}

/// Create a lightweight tag
pub(crate) fn tag(repo: &Repository, name: &str, target: Oid) {
    let object = repo.find_object(target, None).unwrap();
    repo.tag_lightweight(name, &object, false).unwrap();
}

/// Commit on top of `parent` without moving HEAD
pub(crate) fn commit_on(repo: &Repository, parent: Oid, message: &str, seconds: i64) -> Oid {
    let parent = repo.find_commit(parent).unwrap();
    let tree = parent.tree().unwrap();
    let sig = Signature::new("Test", "test@example.com", &Time::new(seconds, 0)).unwrap();

    repo.commit(None, &sig, &sig, message, &tree, &[&parent])
        .unwrap()
}
