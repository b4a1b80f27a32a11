//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::Path;

use git2::{Oid, Repository, Signature, Time};

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    ///
    /// The local config carries an identity so the `git` binary can commit.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        let mut config = repo.config().expect("Failed to open repo config");
        config.set_str("user.name", "Test User").expect("Failed to set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Failed to set user.email");
        config.set_bool("commit.gpgsign", false).expect("Failed to disable signing");

        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `content` to `path` and add it to the index.
    pub fn stage_file(&self, path: &str, content: &str) {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&full_path, content).expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(path)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Remove `path` from the working tree and the index.
    pub fn stage_removal(&self, path: &str) {
        std::fs::remove_file(self.dir.path().join(path)).expect("Failed to remove test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index.remove_path(Path::new(path)).expect("Failed to remove file from index");
        index.write().expect("Failed to write index");
    }

    /// Commit whatever is staged. Returns the commit OID.
    pub fn commit_staged(&self, message: &str, seconds: i64) -> Oid {
        let sig = Signature::new("Test User", "test@example.com", &Time::new(seconds, 0))
            .expect("Failed to create signature");

        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        // Get parent commit if exists
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a commit with the given message, touching `history.txt`.
    ///
    /// Commits are spaced one minute apart from a fixed epoch so ordering by
    /// time is deterministic.
    pub fn commit(&self, message: &str) -> Oid {
        let count = self.commit_count();
        self.stage_file("history.txt", &format!("{}\n{}\n", count, message));
        self.commit_staged(message, 1_700_000_000 + 60 * count as i64)
    }

    /// Number of commits reachable from HEAD.
    pub fn commit_count(&self) -> usize {
        let Ok(mut revwalk) = self.repo.revwalk() else {
            return 0;
        };
        if revwalk.push_head().is_err() {
            return 0;
        }
        revwalk.count()
    }

    /// Message of the HEAD commit.
    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map(|c| c.message().unwrap_or("").to_string())
            .expect("Failed to read HEAD commit")
    }
}
