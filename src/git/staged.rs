//! Staged change collection using git2.
//!
//! Everything here compares the index against the HEAD tree, so unstaged and
//! untracked work never influences the generated message.

use git2::{Delta, Diff, DiffFindOptions, DiffFormat, ErrorCode, Repository, Tree};
use tracing::{debug, warn};

use crate::analysis::{DiffStats, FileChange, FileStatus};
use crate::error::GitError;

/// Maximum characters for the unified diff text before truncation.
const MAX_DIFF_LENGTH: usize = 100_000;

/// Snapshot of the staged changes.
#[derive(Debug, Clone)]
pub struct StagedChanges {
    pub diff_text: String,
    pub files: Vec<FileChange>,
    pub stats: DiffStats,
    pub truncated: bool,
}

/// Resolve the HEAD tree, distinguishing empty-repo errors from real failures.
///
/// Returns `Ok(None)` for repos with no commits (unborn branch / not found).
pub(crate) fn resolve_head_tree(repo: &Repository) -> Result<Option<Tree<'_>>, GitError> {
    let head_ref = match repo.head() {
        Ok(r) => r,
        Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
            return Ok(None);
        }
        Err(e) => return Err(GitError::DiffFailed(e)),
    };

    let tree = head_ref.peel_to_tree().map_err(GitError::DiffFailed)?;
    Ok(Some(tree))
}

/// Diff of the index against HEAD with renames detected.
fn staged_diff(repo: &Repository) -> Result<Diff<'_>, GitError> {
    let head_tree = resolve_head_tree(repo)?;
    let mut diff = repo
        .diff_tree_to_index(head_tree.as_ref(), None, None)
        .map_err(GitError::DiffFailed)?;

    let mut find_opts = DiffFindOptions::new();
    find_opts.renames(true);
    diff.find_similar(Some(&mut find_opts))
        .map_err(GitError::DiffFailed)?;

    Ok(diff)
}

/// Whether anything is staged for commit.
pub fn has_staged_changes(repo: &Repository) -> Result<bool, GitError> {
    Ok(staged_diff(repo)?.deltas().len() > 0)
}

/// Collect the staged diff text, file list and stats in one pass.
pub fn collect_staged(repo: &Repository) -> Result<StagedChanges, GitError> {
    let diff = staged_diff(repo)?;
    let files = collect_files(&diff);

    let git_stats = diff.stats().map_err(GitError::DiffFailed)?;
    let stats = DiffStats {
        files: git_stats.files_changed(),
        insertions: git_stats.insertions(),
        deletions: git_stats.deletions(),
    };

    let mut diff_text = String::new();
    let truncated = append_diff_text(&diff, &mut diff_text);

    debug!(
        files = files.len(),
        insertions = stats.insertions,
        deletions = stats.deletions,
        truncated,
        "Collected staged changes"
    );

    Ok(StagedChanges {
        diff_text,
        files,
        stats,
        truncated,
    })
}

/// Changed file entries of a diff, in diff order.
fn collect_files(diff: &Diff<'_>) -> Vec<FileChange> {
    diff.deltas()
        .filter_map(|delta| {
            let status = match delta.status() {
                Delta::Added | Delta::Copied => FileStatus::Added,
                Delta::Deleted => FileStatus::Deleted,
                Delta::Renamed => FileStatus::Renamed,
                _ => FileStatus::Modified,
            };

            let new_path = delta.new_file().path();
            let old_path = delta.old_file().path();
            let path = match status {
                FileStatus::Deleted => old_path.or(new_path),
                _ => new_path.or(old_path),
            }?;

            Some(FileChange::new(path.to_string_lossy(), status))
        })
        .collect()
}

/// Append unified diff text, respecting the max length. Returns whether the
/// text was truncated.
fn append_diff_text(diff: &Diff<'_>, text: &mut String) -> bool {
    let mut truncated = false;

    if let Err(e) = diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        let content = String::from_utf8_lossy(line.content());

        if text.len() + content.len() + 1 > MAX_DIFF_LENGTH {
            truncated = true;
            return false;
        }

        // File and hunk headers carry their own text; content lines need their origin
        let origin = line.origin();
        if matches!(origin, '+' | '-' | ' ') {
            text.push(origin);
        }
        text.push_str(&content);

        true
    }) {
        if !truncated {
            warn!("Failed to collect diff text: {e}");
            truncated = true;
        }
    }

    truncated
}
