//! Version control access: git2 for reads, the `git` binary for commits.

pub mod executor;
pub mod history;
pub mod retry;
pub mod staged;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use git2::{ErrorCode, Repository};

use crate::analysis::{DiffStats, FileChange};
use crate::error::GitError;
use crate::history::CommitRecord;

pub use executor::{CommitExecutor, GitCommitExecutor, commit_with_retry};
pub use staged::StagedChanges;

/// Everything the commit workflow needs from version control.
///
/// This abstraction allows mocking the repository in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Vcs: Send + Sync {
    async fn is_repository(&self) -> bool;

    async fn has_staged_changes(&self) -> Result<bool, GitError>;

    /// Unified diff of the staged changes.
    async fn staged_diff(&self) -> Result<String, GitError>;

    async fn staged_files(&self) -> Result<Vec<FileChange>, GitError>;

    async fn diff_stats(&self) -> Result<DiffStats, GitError>;

    /// Up to `limit` commits reachable from HEAD, newest first.
    async fn recent_commits(&self, limit: usize) -> Result<Vec<CommitRecord>, GitError>;

    /// Commit the staged changes with `message`.
    async fn commit(&self, message: &str) -> Result<(), GitError>;
}

/// A git repository on disk.
///
/// The repository is reopened for every call so the handle never crosses an
/// await point. The staged diff, file list and stats come from one snapshot,
/// taken on first use and dropped after a commit.
pub struct GitRepository {
    path: PathBuf,
    snapshot: Mutex<Option<StagedChanges>>,
}

impl GitRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Repository, GitError> {
        Repository::discover(&self.path).map_err(|e| match e.code() {
            ErrorCode::NotFound => GitError::NotARepository,
            _ => GitError::OpenRepository(e),
        })
    }

    /// Staged snapshot, failing when nothing is staged.
    pub fn staged_changes(&self) -> Result<StagedChanges, GitError> {
        let mut snapshot = self
            .snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(changes) = snapshot.as_ref() {
            return Ok(changes.clone());
        }

        let changes = staged::collect_staged(&self.open()?)?;
        if changes.files.is_empty() {
            return Err(GitError::NoStagedChanges);
        }
        *snapshot = Some(changes.clone());
        Ok(changes)
    }

    fn clear_snapshot(&self) {
        let mut snapshot = self
            .snapshot
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *snapshot = None;
    }
}

#[async_trait]
impl Vcs for GitRepository {
    async fn is_repository(&self) -> bool {
        self.open().is_ok()
    }

    async fn has_staged_changes(&self) -> Result<bool, GitError> {
        staged::has_staged_changes(&self.open()?)
    }

    async fn staged_diff(&self) -> Result<String, GitError> {
        Ok(self.staged_changes()?.diff_text)
    }

    async fn staged_files(&self) -> Result<Vec<FileChange>, GitError> {
        Ok(self.staged_changes()?.files)
    }

    async fn diff_stats(&self) -> Result<DiffStats, GitError> {
        Ok(self.staged_changes()?.stats)
    }

    async fn recent_commits(&self, limit: usize) -> Result<Vec<CommitRecord>, GitError> {
        history::recent_commits(&self.open()?, limit)
    }

    async fn commit(&self, message: &str) -> Result<(), GitError> {
        let result = commit_with_retry(message, &GitCommitExecutor::new(&self.path)).await;
        self.clear_snapshot();
        result
    }
}
