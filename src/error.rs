//! Error types for quill modules using thiserror.

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository. Run quill from within a git repository.")]
    NotARepository,

    #[error("Failed to open repository: {0}")]
    OpenRepository(#[source] git2::Error),

    #[error("Failed to collect staged changes: {0}")]
    DiffFailed(#[source] git2::Error),

    #[error("Failed to parse commit: {0}")]
    ParseCommit(#[source] git2::Error),

    #[error("Failed to walk commit history: {0}")]
    RevwalkError(#[source] git2::Error),

    #[error("No staged changes found. Stage your changes with \"git add\" first.")]
    NoStagedChanges,

    #[error("git executable not found in PATH")]
    GitNotInstalled,

    #[error("Failed to spawn git process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git {0} timed out after {1} seconds")]
    Timeout(String, u64),

    #[error("git {operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },

    #[error("All retry attempts failed: {0}")]
    RetriesExhausted(#[source] Box<GitError>),
}

impl GitError {
    /// Whether the failure is worth retrying (another git process held the index lock).
    pub fn is_transient(&self) -> bool {
        match self {
            GitError::CommandFailed { stderr, .. } => stderr.contains("index.lock"),
            _ => false,
        }
    }
}

/// Errors from commit message generation.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Analysis must include a change type")]
    MissingChangeType,

    #[error("Failed to generate primary commit message")]
    EmptyPrimaryMessage,
}

/// Errors from validating a commit message before committing.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MessageError {
    #[error("Commit message cannot be empty")]
    Empty,

    #[error("Commit message is too long ({length} characters, maximum is {max})")]
    TooLong { length: usize, max: usize },
}

/// Errors from the top-level quill run.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error("Failed to generate commit messages: {0}")]
    Generate(#[from] GenerateError),

    #[error("Invalid commit message: {0}")]
    Message(#[from] MessageError),

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Cancelled by user")]
    Cancelled,
}
