//! quill - Heuristic commit message generation from staged changes.
//!
//! # Overview
//!
//! quill classifies the staged diff into a conventional change type, learns
//! the formatting habits of the repository from its recent commits, and
//! synthesizes ranked commit message candidates that follow those habits.
//! Everything is local pattern matching; no network access is involved.

pub mod analysis;
pub mod app;
pub mod error;
pub mod git;
pub mod history;
pub mod message;
pub mod prompt;

// Re-export commonly used types
pub use analysis::{ChangeAnalysis, ChangeType, FileChange, FileStatus, analyze};
pub use app::{Outcome, RunConfig, run};
pub use error::{AppError, GenerateError, GitError, MessageError};
pub use git::{GitRepository, Vcs};
pub use history::{StyleGuide, StyleProfile, analyze_commit_history};
pub use message::{GenerateOptions, MessageCandidate, generate_messages};
