//! `git` subprocess execution for operations that must honor the user's git setup.
//!
//! Commits shell out to the system `git` binary so hooks, signing and the
//! user's config all apply.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::retry::retry_with_backoff;
use crate::error::GitError;

/// Default timeout for git subprocess execution.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable to override the default timeout.
pub const TIMEOUT_ENV_VAR: &str = "QUILL_GIT_TIMEOUT";

/// Get the configured timeout duration.
///
/// Reads from `QUILL_GIT_TIMEOUT` if set, otherwise uses 30 seconds. An
/// invalid value logs a warning and falls back to the default.
pub fn git_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Check that the `git` executable is on the PATH.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git")
        .map(|_| ())
        .map_err(|_| GitError::GitNotInstalled)
}

/// Run `git` in `repo_path`, optionally feeding `stdin`, and return stdout.
pub async fn run_git(
    repo_path: &Path,
    args: &[&str],
    stdin: Option<&str>,
    operation: &str,
) -> Result<String, GitError> {
    let timeout_duration = git_timeout();
    let timeout_secs = timeout_duration.as_secs();

    debug!(?args, "Running git {}", operation);

    let output = timeout(timeout_duration, async {
        let mut child = Command::new("git")
            .current_dir(repo_path)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
            pipe.write_all(input.as_bytes()).await?;
        }

        child.wait_with_output().await
    })
    .await
    .map_err(|_| GitError::Timeout(operation.to_string(), timeout_secs))?
    .map_err(GitError::SpawnFailed)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(GitError::CommandFailed {
            operation: operation.to_string(),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Trait for creating commits.
///
/// This abstraction allows mocking the git subprocess in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommitExecutor: Send + Sync {
    /// Create a commit from the staged changes with the given message.
    async fn commit(&self, message: &str) -> Result<(), GitError>;
}

/// Executor that runs `git commit -F -` in a repository.
pub struct GitCommitExecutor {
    repo_path: PathBuf,
}

impl GitCommitExecutor {
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }
}

#[async_trait]
impl CommitExecutor for GitCommitExecutor {
    async fn commit(&self, message: &str) -> Result<(), GitError> {
        check_git_installed()?;
        run_git(&self.repo_path, &["commit", "-F", "-"], Some(message), "commit").await?;
        Ok(())
    }
}

/// Commit with retries while another git process holds the index lock.
pub async fn commit_with_retry<E: CommitExecutor + ?Sized>(
    message: &str,
    executor: &E,
) -> Result<(), GitError> {
    retry_with_backoff(
        || async { executor.commit(message).await },
        GitError::is_transient,
        |e| GitError::RetriesExhausted(Box::new(e)),
    )
    .await
}
